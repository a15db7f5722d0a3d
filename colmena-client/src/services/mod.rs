//! Per-domain wrappers over [`crate::ApiClient`].
//!
//! Each service is a thin, cloneable facade that pairs a route with its
//! request/response types. No service holds state beyond the shared client.

mod auth;
mod event_access;
mod events;
mod reservations;

pub use auth::AuthService;
pub use event_access::EventAccessService;
pub use events::EventsService;
pub use reservations::ReservationsService;
