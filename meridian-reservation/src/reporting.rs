use crate::models::{Flight, ReservationStatus, Transaction, TransactionKind};
use crate::store::ReservationStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Daily-collections summary derived from the transaction ledger.
///
/// All figures are recomputed from the ledger on every call; the queries are
/// pure so callers and tests can rely on them having no side effects.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionsReport {
    pub total_revenue: f64,
    pub total_refunds: f64,
    pub net_revenue: f64,
    pub reservation_count: usize,
    pub confirmed_count: usize,
    pub cancelled_count: usize,
    pub day: DayCollections,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCollections {
    pub date: NaiveDate,
    pub revenue: f64,
    pub refunds: f64,
    pub net: f64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ScheduleStatus {
    Completed,
    Today,
    Scheduled,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOverview {
    pub today: usize,
    pub scheduled: usize,
    pub completed: usize,
}

fn sum_by_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn total_revenue(store: &ReservationStore) -> f64 {
    sum_by_kind(store.transactions(), TransactionKind::Booking)
}

pub fn total_refunds(store: &ReservationStore) -> f64 {
    sum_by_kind(store.transactions(), TransactionKind::Refund)
}

pub fn net_revenue(store: &ReservationStore) -> f64 {
    total_revenue(store) - total_refunds(store)
}

pub fn confirmed_count(store: &ReservationStore) -> usize {
    store
        .reservations()
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .count()
}

pub fn cancelled_count(store: &ReservationStore) -> usize {
    store
        .reservations()
        .iter()
        .filter(|r| r.status == ReservationStatus::Cancelled)
        .count()
}

pub fn transactions_on(store: &ReservationStore, date: NaiveDate) -> Vec<Transaction> {
    store
        .transactions()
        .iter()
        .filter(|t| t.date == date)
        .cloned()
        .collect()
}

pub fn collections_report(store: &ReservationStore, date: NaiveDate) -> CollectionsReport {
    let day_transactions = transactions_on(store, date);
    let revenue = sum_by_kind(&day_transactions, TransactionKind::Booking);
    let refunds = sum_by_kind(&day_transactions, TransactionKind::Refund);
    CollectionsReport {
        total_revenue: total_revenue(store),
        total_refunds: total_refunds(store),
        net_revenue: net_revenue(store),
        reservation_count: store.reservations().len(),
        confirmed_count: confirmed_count(store),
        cancelled_count: cancelled_count(store),
        day: DayCollections {
            date,
            revenue,
            refunds,
            net: revenue - refunds,
            transactions: day_transactions,
        },
    }
}

/// Booking revenue per ledger date, ordered by date.
pub fn bookings_by_date(store: &ReservationStore) -> BTreeMap<NaiveDate, f64> {
    let mut by_date = BTreeMap::new();
    for t in store.transactions() {
        if t.kind == TransactionKind::Booking {
            *by_date.entry(t.date).or_insert(0.0) += t.amount;
        }
    }
    by_date
}

/// A flight's position relative to a reference date.
pub fn schedule_status(flight: &Flight, reference: NaiveDate) -> ScheduleStatus {
    if flight.date < reference {
        ScheduleStatus::Completed
    } else if flight.date == reference {
        ScheduleStatus::Today
    } else {
        ScheduleStatus::Scheduled
    }
}

pub fn schedule_overview(store: &ReservationStore, reference: NaiveDate) -> ScheduleOverview {
    let mut overview = ScheduleOverview {
        today: 0,
        scheduled: 0,
        completed: 0,
    };
    for flight in store.flights() {
        match schedule_status(flight, reference) {
            ScheduleStatus::Today => overview.today += 1,
            ScheduleStatus::Scheduled => overview.scheduled += 1,
            ScheduleStatus::Completed => overview.completed += 1,
        }
    }
    overview
}

/// Flights matching an optional date and optional schedule status.
pub fn filtered_flights<'a>(
    store: &'a ReservationStore,
    reference: NaiveDate,
    date: Option<NaiveDate>,
    status: Option<ScheduleStatus>,
) -> Vec<&'a Flight> {
    store
        .flights()
        .iter()
        .filter(|f| date.map_or(true, |d| f.date == d))
        .filter(|f| status.map_or(true, |s| schedule_status(f, reference) == s))
        .collect()
}
