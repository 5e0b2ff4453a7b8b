use crate::models::{
    Aircraft, AircraftPatch, Flight, FlightPatch, Passenger, Reservation, Sector, SectorPatch,
    Transaction,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Canonical lists of every reservation-app entity for one session.
///
/// The store is explicitly constructed and injected into whatever handles
/// requests; there is no ambient singleton, so tests can hold isolated
/// instances. CRUD operations keep the original list-replacement semantics
/// and perform no cross-entity consistency checks: deleting an aircraft that
/// a flight still references leaves a dangling id that lookups render as
/// "Unknown".
#[derive(Debug, Default)]
pub struct ReservationStore {
    aircraft: Vec<Aircraft>,
    sectors: Vec<Sector>,
    flights: Vec<Flight>,
    passengers: Vec<Passenger>,
    reservations: Vec<Reservation>,
    transactions: Vec<Transaction>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Aircraft

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Uuid {
        let id = aircraft.id;
        self.aircraft.push(aircraft);
        id
    }

    pub fn update_aircraft(&mut self, id: Uuid, patch: AircraftPatch) -> Option<&Aircraft> {
        let aircraft = self.aircraft.iter_mut().find(|a| a.id == id)?;
        if let Some(model) = patch.model {
            aircraft.model = model;
        }
        if let Some(capacity) = patch.capacity {
            aircraft.capacity = capacity;
        }
        if let Some(status) = patch.status {
            aircraft.status = status;
        }
        Some(aircraft)
    }

    pub fn delete_aircraft(&mut self, id: Uuid) -> bool {
        let before = self.aircraft.len();
        self.aircraft.retain(|a| a.id != id);
        self.aircraft.len() != before
    }

    pub fn find_aircraft(&self, id: Uuid) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    // Sectors

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn add_sector(&mut self, sector: Sector) -> Uuid {
        let id = sector.id;
        self.sectors.push(sector);
        id
    }

    pub fn update_sector(&mut self, id: Uuid, patch: SectorPatch) -> Option<&Sector> {
        let sector = self.sectors.iter_mut().find(|s| s.id == id)?;
        if let Some(origin) = patch.origin {
            sector.origin = origin;
        }
        if let Some(destination) = patch.destination {
            sector.destination = destination;
        }
        if let Some(distance) = patch.distance_miles {
            sector.distance_miles = distance;
        }
        if let Some(label) = patch.duration_label {
            sector.duration_label = label;
        }
        Some(sector)
    }

    pub fn delete_sector(&mut self, id: Uuid) -> bool {
        let before = self.sectors.len();
        self.sectors.retain(|s| s.id != id);
        self.sectors.len() != before
    }

    pub fn find_sector(&self, id: Uuid) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    // Flights

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn add_flight(&mut self, flight: Flight) -> Uuid {
        let id = flight.id;
        self.flights.push(flight);
        id
    }

    pub fn update_flight(&mut self, id: Uuid, patch: FlightPatch) -> Option<&Flight> {
        let flight = self.flights.iter_mut().find(|f| f.id == id)?;
        if let Some(number) = patch.flight_number {
            flight.flight_number = number;
        }
        if let Some(aircraft_id) = patch.aircraft_id {
            flight.aircraft_id = aircraft_id;
        }
        if let Some(sector_id) = patch.sector_id {
            flight.sector_id = sector_id;
        }
        if let Some(date) = patch.date {
            flight.date = date;
        }
        if let Some(departure) = patch.departure_time {
            flight.departure_time = departure;
        }
        if let Some(arrival) = patch.arrival_time {
            flight.arrival_time = arrival;
        }
        if let Some(price) = patch.price {
            flight.price = price;
        }
        if let Some(seats) = patch.available_seats {
            flight.available_seats = seats;
        }
        Some(flight)
    }

    pub fn delete_flight(&mut self, id: Uuid) -> bool {
        let before = self.flights.len();
        self.flights.retain(|f| f.id != id);
        self.flights.len() != before
    }

    pub fn find_flight(&self, id: Uuid) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub(crate) fn find_flight_mut(&mut self, id: Uuid) -> Option<&mut Flight> {
        self.flights.iter_mut().find(|f| f.id == id)
    }

    // Passengers

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn add_passenger(&mut self, passenger: Passenger) -> Uuid {
        let id = passenger.id;
        self.passengers.push(passenger);
        id
    }

    pub fn find_passenger(&self, id: Uuid) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    // Reservations and the transaction ledger

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_reservation_by_pnr(&self, pnr: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.pnr == pnr)
    }

    pub(crate) fn find_reservation_by_pnr_mut(&mut self, pnr: &str) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.pnr == pnr)
    }

    pub(crate) fn push_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    pub(crate) fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Booking codes already issued, for uniqueness checks.
    pub fn issued_pnrs(&self) -> HashSet<String> {
        self.reservations.iter().map(|r| r.pnr.clone()).collect()
    }
}
