use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use meridian_reservation::models::Reservation;
use meridian_reservation::ticket::{self, Ticket};
use meridian_reservation::{BookingConfirmation, BookingRequest, CancellationSummary};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/reservations", get(list_reservations).post(book))
        .route("/v1/reservations/{pnr}/cancel", post(cancel))
        .route("/v1/tickets", get(list_tickets))
        .route("/v1/tickets/{pnr}", get(ticket_lookup))
}

async fn list_reservations(State(state): State<AppState>) -> Json<Vec<Reservation>> {
    let store = state.reservations.read().await;
    Json(store.reservations().to_vec())
}

async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    let mut store = state.reservations.write().await;
    let confirmation = store.book(req, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

async fn cancel(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<CancellationSummary>, AppError> {
    let mut store = state.reservations.write().await;
    let summary = store.cancel(&pnr, Utc::now().date_naive())?;
    Ok(Json(summary))
}

async fn list_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    let store = state.reservations.read().await;
    Json(ticket::confirmed_tickets(&store))
}

async fn ticket_lookup(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<Ticket>, AppError> {
    let store = state.reservations.read().await;
    ticket::ticket_for_pnr(&store, &pnr).map(Json).ok_or_else(|| {
        AppError::NotFoundError("Active reservation not found with this PNR".to_string())
    })
}
