use colmena_model::{CheckinResponse, Reservation, ReservationCreate, ReservationList};

use crate::api_client::ApiClient;
use crate::error::Result;
use crate::routes;

/// Reservation operations against `/api/reservations`.
#[derive(Debug, Clone)]
pub struct ReservationsService {
    api: ApiClient,
}

impl ReservationsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Public: create a reservation against an event's public code.
    pub async fn create_public(
        &self,
        public_code: &str,
        payload: &ReservationCreate,
    ) -> Result<Reservation> {
        self.api
            .post_public(&routes::reservations::create_public(public_code), payload)
            .await
    }

    /// Security/admin: one-shot check-in of a reservation code.
    ///
    /// The code travels in the path; the response always answers 200 and
    /// reports rejection through `ok = false` plus a message code.
    pub async fn checkin(&self, reservation_code: &str) -> Result<CheckinResponse> {
        self.api
            .post_empty(&routes::reservations::checkin(reservation_code))
            .await
    }

    /// Security/admin: list an event's reservations.
    pub async fn list_by_event(&self, event_id: i64) -> Result<ReservationList> {
        self.api.get(&routes::reservations::by_event(event_id)).await
    }

    /// Public: the reservation's check-in QR as PNG bytes.
    pub async fn qr_png(&self, reservation_id: i64) -> Result<Vec<u8>> {
        self.api.get_png(&routes::reservations::qr(reservation_id)).await
    }
}
