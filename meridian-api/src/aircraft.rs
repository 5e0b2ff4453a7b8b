use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use meridian_reservation::models::{Aircraft, AircraftPatch, AircraftStatus};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateAircraftRequest {
    model: String,
    capacity: i32,
    status: AircraftStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/aircraft", get(list_aircraft).post(create_aircraft))
        .route("/v1/aircraft/{id}", put(update_aircraft).delete(delete_aircraft))
}

async fn list_aircraft(State(state): State<AppState>) -> Json<Vec<Aircraft>> {
    let store = state.reservations.read().await;
    Json(store.aircraft().to_vec())
}

async fn create_aircraft(
    State(state): State<AppState>,
    Json(req): Json<CreateAircraftRequest>,
) -> Result<(StatusCode, Json<Aircraft>), AppError> {
    let aircraft = Aircraft::new(&req.model, req.capacity, req.status)?;
    let mut store = state.reservations.write().await;
    let id = store.add_aircraft(aircraft.clone());
    tracing::info!(%id, model = %aircraft.model, "aircraft created");
    Ok((StatusCode::CREATED, Json(aircraft)))
}

async fn update_aircraft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AircraftPatch>,
) -> Result<Json<Aircraft>, AppError> {
    let mut store = state.reservations.write().await;
    let updated = store
        .update_aircraft(id, patch)
        .ok_or_else(|| AppError::NotFoundError(format!("Aircraft not found: {}", id)))?;
    Ok(Json(updated.clone()))
}

async fn delete_aircraft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.reservations.write().await;
    if store.delete_aircraft(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Aircraft not found: {}", id)))
    }
}
