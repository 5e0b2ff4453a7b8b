use axum::{extract::State, routing::get, Extension, Json, Router};
use meridian_exam::models::ExamResult;
use meridian_exam::reporting;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ResultsResponse {
    results: Vec<ExamResult>,
    average_percentage: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/results", get(own_results))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/v1/admin/results", get(all_results))
}

async fn own_results(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ResultsResponse>, AppError> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Malformed token subject".to_string()))?;

    let hub = state.exam.read().await;
    let results: Vec<ExamResult> = reporting::user_results(hub.catalog.results(), user_id)
        .into_iter()
        .cloned()
        .collect();
    let average_percentage = reporting::average_percentage(hub.catalog.results(), user_id);
    Ok(Json(ResultsResponse {
        results,
        average_percentage,
    }))
}

async fn all_results(State(state): State<AppState>) -> Json<Vec<ExamResult>> {
    let hub = state.exam.read().await;
    Json(hub.catalog.results().to_vec())
}
