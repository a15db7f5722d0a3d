//! Wire data model definitions shared across Colmena crates.
//!
//! Field names and enum values mirror the backend REST API exactly; these
//! types exist so the client and scan crates agree on one serde surface.
#![allow(missing_docs)]

pub mod access;
pub mod auth;
pub mod event;
pub mod reservation;

// Intentionally curated re-exports for downstream consumers.
pub use access::{
    AccessCheckResponse, AccessSnapshot, EventAccessCode, EventAccessCodeCreate,
    EventAccessCodeList,
};
pub use auth::{
    AuthToken, DeleteUserResponse, LoginRequest, LoginResponse, MeResponse, RegisterRequest,
    RegisterResponse, User, UserList, UserRole,
};
pub use event::{Event, EventCreate, EventList, EventStatus, EventSummary, EventUpdate};
pub use reservation::{
    CheckinReservation, CheckinResponse, Reservation, ReservationCreate, ReservationList,
    ReservationStatus,
};

/// Backend message codes surfaced in `ok = false` responses.
///
/// The set is open: unknown codes must round-trip untouched, so responses
/// carry the raw `String` and these constants only name the ones the UI
/// gives special treatment.
pub mod messages {
    pub const OK: &str = "OK";
    pub const ACCESS_GRANTED: &str = "ACCESS_GRANTED";
    pub const ALREADY_USED: &str = "ALREADY_USED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const EVENT_NOT_FOUND: &str = "EVENT_NOT_FOUND";
    pub const EVENT_ENDED: &str = "EVENT_ENDED";
    pub const EVENT_NOT_AVAILABLE: &str = "EVENT_NOT_AVAILABLE";
    pub const EVENT_NOT_ACTIVE: &str = "EVENT_NOT_ACTIVE";
    pub const CODE_DISABLED: &str = "CODE_DISABLED";
}
