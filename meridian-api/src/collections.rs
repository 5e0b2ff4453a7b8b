use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use meridian_reservation::reporting::{self, CollectionsReport};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CollectionsQuery {
    date: Option<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/collections", get(collections))
        .route("/v1/collections/by-date", get(by_date))
}

/// Financial report for a day (defaulting to today) plus lifetime totals.
async fn collections(
    State(state): State<AppState>,
    Query(query): Query<CollectionsQuery>,
) -> Json<CollectionsReport> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let store = state.reservations.read().await;
    Json(reporting::collections_report(&store, date))
}

async fn by_date(State(state): State<AppState>) -> Json<BTreeMap<NaiveDate, f64>> {
    let store = state.reservations.read().await;
    Json(reporting::bookings_by_date(&store))
}
