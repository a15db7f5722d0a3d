use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::EventSummary;

/// An unlimited-use access code tied to an event.
///
/// Unlike reservations, access codes are never consumed; each successful
/// scan only increments `scan_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAccessCode {
    pub id: i64,
    pub event_id: i64,

    pub access_code: String,
    #[serde(default)]
    pub label: Option<String>,

    pub is_enabled: bool,

    pub scan_count: i64,
    pub last_scan_at: Option<DateTime<Utc>>,

    pub created_by_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,

    /// Frontend URL encoded into the access QR, prebuilt by the backend.
    pub access_url: String,
    pub qr_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAccessCodeList {
    pub items: Vec<EventAccessCode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventAccessCodeCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The access-code snapshot embedded in a check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessSnapshot {
    pub id: i64,
    pub event_id: i64,
    #[serde(default)]
    pub label: Option<String>,
    pub scan_count: i64,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub is_enabled: bool,
}

/// Result of `POST /api/access-codes/check/{code}`.
///
/// `event` and `access` are populated whenever the code resolved, even on
/// rejection, so the UI can name the event in its message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCheckResponse {
    pub ok: bool,
    pub message: String,
    #[serde(default)]
    pub event: Option<EventSummary>,
    #[serde(default)]
    pub access: Option<AccessSnapshot>,
}
