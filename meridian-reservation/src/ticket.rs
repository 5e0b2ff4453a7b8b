use crate::models::{Reservation, ReservationStatus};
use crate::store::ReservationStore;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

/// Printable ticket view assembled from a Confirmed reservation.
///
/// Dangling references (an aircraft or sector deleted after the flight was
/// created) are rendered as "Unknown" rather than failing the lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub pnr: String,
    pub passenger_name: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub aircraft_model: String,
    pub date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub seat_number: String,
    pub amount: f64,
    pub status: ReservationStatus,
}

fn build_ticket(store: &ReservationStore, reservation: &Reservation) -> Ticket {
    let flight = store.find_flight(reservation.flight_id);
    let passenger = store.find_passenger(reservation.passenger_id);
    let aircraft = flight.and_then(|f| store.find_aircraft(f.aircraft_id));
    let sector = flight.and_then(|f| store.find_sector(f.sector_id));

    Ticket {
        pnr: reservation.pnr.clone(),
        passenger_name: passenger.map_or(UNKNOWN.to_string(), |p| p.name.clone()),
        flight_number: flight.map_or(UNKNOWN.to_string(), |f| f.flight_number.clone()),
        origin: sector.map_or(UNKNOWN.to_string(), |s| s.origin.clone()),
        destination: sector.map_or(UNKNOWN.to_string(), |s| s.destination.clone()),
        aircraft_model: aircraft.map_or(UNKNOWN.to_string(), |a| a.model.clone()),
        date: flight.map(|f| f.date),
        departure_time: flight.map(|f| f.departure_time),
        arrival_time: flight.map(|f| f.arrival_time),
        seat_number: reservation.seat_number.clone(),
        amount: reservation.amount,
        status: reservation.status,
    }
}

/// Ticket for a PNR, restricted to Confirmed reservations; a cancelled or
/// unknown PNR yields no ticket.
pub fn ticket_for_pnr(store: &ReservationStore, pnr: &str) -> Option<Ticket> {
    store
        .reservations()
        .iter()
        .find(|r| r.pnr == pnr && r.status == ReservationStatus::Confirmed)
        .map(|r| build_ticket(store, r))
}

/// Tickets for every Confirmed reservation, in booking order.
pub fn confirmed_tickets(store: &ReservationStore) -> Vec<Ticket> {
    store
        .reservations()
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .map(|r| build_ticket(store, r))
        .collect()
}
