use crate::models::{
    Gender, Passenger, Reservation, ReservationStatus, Transaction, TransactionKind,
    ValidationError,
};
use crate::store::ReservationStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Share of the fare returned on cancellation; the remaining 20% is kept as
/// a cancellation fee. The policy is fixed regardless of time-to-departure
/// or fare class.
pub const REFUND_RATE: f64 = 0.8;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub flight_id: Uuid,
    pub passenger: PassengerDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassengerDetails {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub pnr: String,
    pub reservation_id: Uuid,
    pub passenger_id: Uuid,
    pub seat_number: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancellationSummary {
    pub pnr: String,
    pub refund_amount: f64,
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl ReservationStore {
    /// Book a seat on a flight.
    ///
    /// Creates a fresh passenger record, issues a unique PNR, appends a
    /// Confirmed reservation, decrements the flight's available seats by
    /// exactly one and records a Booking transaction for the full fare.
    /// The seat count is not checked against zero or the aircraft capacity,
    /// matching the inherited behaviour.
    pub fn book(
        &mut self,
        request: BookingRequest,
        today: NaiveDate,
    ) -> Result<BookingConfirmation, ReservationError> {
        let amount = self
            .find_flight(request.flight_id)
            .map(|f| f.price)
            .ok_or(ReservationError::FlightNotFound(request.flight_id))?;

        let passenger = Passenger::new(
            &request.passenger.name,
            request.passenger.age,
            request.passenger.gender,
            &request.passenger.phone,
            &request.passenger.email,
        )?;
        let passenger_id = self.add_passenger(passenger);

        let pnr = meridian_core::ids::generate_pnr(&self.issued_pnrs());
        let seat_number = meridian_core::ids::random_seat_label();
        let reservation = Reservation {
            id: meridian_core::ids::new_entity_id(),
            pnr: pnr.clone(),
            flight_id: request.flight_id,
            passenger_id,
            seat_number: seat_number.clone(),
            booking_date: today,
            status: ReservationStatus::Confirmed,
            amount,
        };
        let reservation_id = reservation.id;
        self.push_reservation(reservation);

        if let Some(flight) = self.find_flight_mut(request.flight_id) {
            flight.available_seats -= 1;
        }

        self.push_transaction(Transaction {
            id: meridian_core::ids::new_entity_id(),
            pnr: pnr.clone(),
            date: today,
            kind: TransactionKind::Booking,
            amount,
        });

        tracing::info!(%pnr, flight_id = %request.flight_id, amount, "reservation booked");

        Ok(BookingConfirmation {
            pnr,
            reservation_id,
            passenger_id,
            seat_number,
            amount,
        })
    }

    /// Cancel a Confirmed reservation by PNR.
    ///
    /// Only Confirmed reservations are eligible; cancelling an already
    /// cancelled booking is rejected rather than re-applying the seat
    /// increment and refund.
    pub fn cancel(
        &mut self,
        pnr: &str,
        today: NaiveDate,
    ) -> Result<CancellationSummary, ReservationError> {
        match self.find_reservation_by_pnr(pnr) {
            None => return Err(ReservationError::ReservationNotFound(pnr.to_string())),
            Some(r) if r.status == ReservationStatus::Cancelled => {
                return Err(ReservationError::AlreadyCancelled(pnr.to_string()))
            }
            Some(_) => {}
        }
        Ok(self.apply_cancellation(pnr, today))
    }

    // Inherited cancellation without the status guard: looks up the first
    // reservation with a matching PNR and re-applies the seat increment and
    // refund even if it is already Cancelled. Kept private so the defect it
    // carries stays documented by tests rather than reachable by callers.
    fn apply_cancellation(&mut self, pnr: &str, today: NaiveDate) -> CancellationSummary {
        let (flight_id, amount) = {
            let reservation = self
                .find_reservation_by_pnr_mut(pnr)
                .expect("caller checked presence");
            reservation.status = ReservationStatus::Cancelled;
            (reservation.flight_id, reservation.amount)
        };

        if let Some(flight) = self.find_flight_mut(flight_id) {
            flight.available_seats += 1;
        }

        let refund_amount = round_cents(amount * REFUND_RATE);
        self.push_transaction(Transaction {
            id: meridian_core::ids::new_entity_id(),
            pnr: pnr.to_string(),
            date: today,
            kind: TransactionKind::Refund,
            amount: refund_amount,
        });

        tracing::info!(%pnr, refund_amount, "reservation cancelled");

        CancellationSummary {
            pnr: pnr.to_string(),
            refund_amount,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Flight not found: {0}")]
    FlightNotFound(Uuid),

    #[error("No reservation found for PNR {0}")]
    ReservationNotFound(String),

    #[error("Reservation {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
