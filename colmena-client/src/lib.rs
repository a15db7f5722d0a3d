//! Typed REST client for the Colmena backend.
//!
//! The backend owns all durable state; this crate only shapes requests,
//! attaches the bearer token, and decodes the documented response bodies.
//! Per-domain wrappers live under [`services`].
#![allow(missing_docs)]

pub mod api_client;
pub mod error;
pub mod routes;
pub mod services;
pub mod token;

pub use api_client::{ApiClient, ClientConfig};
pub use error::{ClientError, Result};
pub use services::{AuthService, EventAccessService, EventsService, ReservationsService};
pub use token::{MemoryTokenStore, TokenStore};
