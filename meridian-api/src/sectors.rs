use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use meridian_reservation::models::{Sector, SectorPatch};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateSectorRequest {
    origin: String,
    destination: String,
    distance_miles: i32,
    duration_label: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sectors", get(list_sectors).post(create_sector))
        .route("/v1/sectors/{id}", put(update_sector).delete(delete_sector))
}

async fn list_sectors(State(state): State<AppState>) -> Json<Vec<Sector>> {
    let store = state.reservations.read().await;
    Json(store.sectors().to_vec())
}

async fn create_sector(
    State(state): State<AppState>,
    Json(req): Json<CreateSectorRequest>,
) -> Result<(StatusCode, Json<Sector>), AppError> {
    let sector = Sector::new(
        &req.origin,
        &req.destination,
        req.distance_miles,
        &req.duration_label,
    )?;
    let mut store = state.reservations.write().await;
    store.add_sector(sector.clone());
    Ok((StatusCode::CREATED, Json(sector)))
}

async fn update_sector(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SectorPatch>,
) -> Result<Json<Sector>, AppError> {
    let mut store = state.reservations.write().await;
    let updated = store
        .update_sector(id, patch)
        .ok_or_else(|| AppError::NotFoundError(format!("Sector not found: {}", id)))?;
    Ok(Json(updated.clone()))
}

async fn delete_sector(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.reservations.write().await;
    if store.delete_sector(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Sector not found: {}", id)))
    }
}
