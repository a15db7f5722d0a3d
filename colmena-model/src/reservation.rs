use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a single reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Created,
    Cancelled,
    CheckedIn,
}

/// A full reservation row as served to admin/security views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub event_id: i64,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub instagram: Option<String>,

    pub reservation_code: String,
    pub status: ReservationStatus,

    pub used_at: Option<DateTime<Utc>>,
    pub scan_count: i64,
    pub last_scan_at: Option<DateTime<Utc>>,

    pub email_sent_at: Option<DateTime<Utc>>,
    pub email_send_status: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Check-in URL encoded into the reservation QR, prebuilt by the backend.
    pub checkin_url: String,
    pub qr_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationList {
    pub total: i64,
    pub items: Vec<Reservation>,
}

/// Payload for the public reservation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// The reservation snapshot embedded in a check-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinReservation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
}

impl CheckinReservation {
    /// Person's full name for display, trimmed of stray whitespace.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Result of `POST /api/reservations/checkin/{code}`.
///
/// `ok = false` carries a message code such as `ALREADY_USED` or `NOT_FOUND`;
/// the set is open, so the raw string is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub ok: bool,
    pub message: String,
    pub reservation_id: Option<i64>,
    pub used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reservation: Option<CheckinReservation>,
}
