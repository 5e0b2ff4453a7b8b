pub mod lifecycle;
pub mod models;
pub mod reporting;
pub mod store;
pub mod ticket;

pub use lifecycle::{BookingConfirmation, BookingRequest, CancellationSummary, ReservationError};
pub use store::ReservationStore;
