use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use meridian_reservation::models::{Flight, FlightPatch};
use meridian_reservation::reporting::{self, ScheduleOverview, ScheduleStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateFlightRequest {
    flight_number: String,
    aircraft_id: Uuid,
    sector_id: Uuid,
    date: NaiveDate,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
    price: f64,
    available_seats: i32,
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    date: Option<NaiveDate>,
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScheduledFlight {
    #[serde(flatten)]
    flight: Flight,
    schedule_status: ScheduleStatus,
}

#[derive(Debug, Serialize)]
struct ScheduleResponse {
    overview: ScheduleOverview,
    flights: Vec<ScheduledFlight>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights).post(create_flight))
        .route("/v1/flights/scheduled", get(scheduled_flights))
        .route("/v1/flights/{id}", put(update_flight).delete(delete_flight))
}

async fn list_flights(State(state): State<AppState>) -> Json<Vec<Flight>> {
    let store = state.reservations.read().await;
    Json(store.flights().to_vec())
}

async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let flight = Flight::new(
        &req.flight_number,
        req.aircraft_id,
        req.sector_id,
        req.date,
        req.departure_time,
        req.arrival_time,
        req.price,
        req.available_seats,
    )?;
    let mut store = state.reservations.write().await;
    store.add_flight(flight.clone());
    tracing::info!(flight_number = %flight.flight_number, "flight created");
    Ok((StatusCode::CREATED, Json(flight)))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FlightPatch>,
) -> Result<Json<Flight>, AppError> {
    let mut store = state.reservations.write().await;
    let updated = store
        .update_flight(id, patch)
        .ok_or_else(|| AppError::NotFoundError(format!("Flight not found: {}", id)))?;
    Ok(Json(updated.clone()))
}

async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.reservations.write().await;
    if store.delete_flight(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Flight not found: {}", id)))
    }
}

fn parse_status(raw: &str) -> Result<ScheduleStatus, AppError> {
    match raw {
        "today" => Ok(ScheduleStatus::Today),
        "scheduled" => Ok(ScheduleStatus::Scheduled),
        "completed" => Ok(ScheduleStatus::Completed),
        other => Err(AppError::ValidationError(format!(
            "Unknown schedule status: {}",
            other
        ))),
    }
}

async fn scheduled_flights(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let reference = Utc::now().date_naive();

    let store = state.reservations.read().await;
    let flights = reporting::filtered_flights(&store, reference, query.date, status)
        .into_iter()
        .map(|f| ScheduledFlight {
            flight: f.clone(),
            schedule_status: reporting::schedule_status(f, reference),
        })
        .collect();

    Ok(Json(ScheduleResponse {
        overview: reporting::schedule_overview(&store, reference),
        flights,
    }))
}
