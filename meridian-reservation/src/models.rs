use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AircraftStatus {
    Active,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: Uuid,
    pub model: String,
    pub capacity: i32,
    pub status: AircraftStatus,
}

impl Aircraft {
    pub fn new(model: &str, capacity: i32, status: AircraftStatus) -> Result<Self, ValidationError> {
        if model.trim().is_empty() {
            return Err(ValidationError::MissingField("model"));
        }
        if capacity <= 0 {
            return Err(ValidationError::NonPositive("capacity"));
        }
        Ok(Self {
            id: meridian_core::ids::new_entity_id(),
            model: model.trim().to_string(),
            capacity,
            status,
        })
    }
}

/// A scheduled origin-destination route, independent of any flight instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance_miles: i32,
    pub duration_label: String,
}

impl Sector {
    pub fn new(
        origin: &str,
        destination: &str,
        distance_miles: i32,
        duration_label: &str,
    ) -> Result<Self, ValidationError> {
        if origin.trim().is_empty() {
            return Err(ValidationError::MissingField("origin"));
        }
        if destination.trim().is_empty() {
            return Err(ValidationError::MissingField("destination"));
        }
        if distance_miles <= 0 {
            return Err(ValidationError::NonPositive("distance_miles"));
        }
        Ok(Self {
            id: meridian_core::ids::new_entity_id(),
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            distance_miles,
            duration_label: duration_label.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub aircraft_id: Uuid,
    pub sector_id: Uuid,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub price: f64,
    pub available_seats: i32,
}

impl Flight {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flight_number: &str,
        aircraft_id: Uuid,
        sector_id: Uuid,
        date: NaiveDate,
        departure_time: NaiveTime,
        arrival_time: NaiveTime,
        price: f64,
        available_seats: i32,
    ) -> Result<Self, ValidationError> {
        if flight_number.trim().is_empty() {
            return Err(ValidationError::MissingField("flight_number"));
        }
        if price < 0.0 {
            return Err(ValidationError::Negative("price"));
        }
        // The upper bound (seats <= aircraft capacity) is deliberately not
        // checked here; seat counts are only adjusted by the booking
        // lifecycle after creation.
        if available_seats < 0 {
            return Err(ValidationError::Negative("available_seats"));
        }
        Ok(Self {
            id: meridian_core::ids::new_entity_id(),
            flight_number: flight_number.trim().to_string(),
            aircraft_id,
            sector_id,
            date,
            departure_time,
            arrival_time,
            price,
            available_seats,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Created once per booking attempt; travellers are never deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
}

impl Passenger {
    pub fn new(
        name: &str,
        age: u8,
        gender: Gender,
        phone: &str,
        email: &str,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(Self {
            id: meridian_core::ids::new_entity_id(),
            name: name.trim().to_string(),
            age,
            gender,
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// Reservation records are only ever marked Cancelled, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub pnr: String,
    pub flight_id: Uuid,
    pub passenger_id: Uuid,
    pub seat_number: String,
    pub booking_date: NaiveDate,
    pub status: ReservationStatus,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Booking,
    Cancellation,
    Refund,
}

/// One entry in the append-only monetary ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub pnr: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
}

/// Partial update payloads for the managed entities.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AircraftPatch {
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<AircraftStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectorPatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_miles: Option<i32>,
    pub duration_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub aircraft_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub price: Option<f64>,
    pub available_seats: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field missing or empty: {0}")]
    MissingField(&'static str),

    #[error("Field must be positive: {0}")]
    NonPositive(&'static str),

    #[error("Field must not be negative: {0}")]
    Negative(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aircraft_requires_model_and_capacity() {
        assert!(Aircraft::new("  ", 189, AircraftStatus::Active).is_err());
        assert!(Aircraft::new("Boeing 737-800", 0, AircraftStatus::Active).is_err());
        let aircraft = Aircraft::new("Boeing 737-800", 189, AircraftStatus::Active).unwrap();
        assert_eq!(aircraft.capacity, 189);
    }

    #[test]
    fn test_sector_requires_endpoints() {
        assert!(Sector::new("", "Los Angeles", 2445, "5h 30m").is_err());
        assert!(Sector::new("New York", "Los Angeles", -1, "5h 30m").is_err());
        let sector = Sector::new("New York", "Los Angeles", 2445, "5h 30m").unwrap();
        assert_eq!(sector.destination, "Los Angeles");
    }

    #[test]
    fn test_flight_rejects_negative_price() {
        let aircraft_id = meridian_core::ids::new_entity_id();
        let sector_id = meridian_core::ids::new_entity_id();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let dep = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let arr = NaiveTime::from_hms_opt(11, 30, 0).unwrap();
        assert!(Flight::new("HA101", aircraft_id, sector_id, date, dep, arr, -1.0, 150).is_err());
        assert!(Flight::new("HA101", aircraft_id, sector_id, date, dep, arr, 299.0, 150).is_ok());
    }
}
