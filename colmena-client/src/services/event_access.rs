use colmena_model::{
    AccessCheckResponse, EventAccessCode, EventAccessCodeCreate, EventAccessCodeList,
};

use crate::api_client::ApiClient;
use crate::error::Result;
use crate::routes;

/// Unlimited access-code operations (`/api/events/{id}/access-codes` and
/// `/api/access-codes/check`).
#[derive(Debug, Clone)]
pub struct EventAccessService {
    api: ApiClient,
}

impl EventAccessService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Admin: list an event's access codes.
    pub async fn list_by_event(&self, event_id: i64) -> Result<EventAccessCodeList> {
        self.api.get(&routes::events::access_codes(event_id)).await
    }

    /// Admin: mint a new unlimited access code for an event.
    pub async fn create(
        &self,
        event_id: i64,
        payload: &EventAccessCodeCreate,
    ) -> Result<EventAccessCode> {
        self.api
            .post(&routes::events::access_codes(event_id), payload)
            .await
    }

    /// Security/admin: validate an access code and bump its scan counter.
    pub async fn check(&self, access_code: &str) -> Result<AccessCheckResponse> {
        self.api
            .post_empty(&routes::access_codes::check(access_code))
            .await
    }

    /// Admin: the access code's QR as PNG bytes.
    pub async fn qr_png(&self, event_id: i64, access_id: i64) -> Result<Vec<u8>> {
        self.api
            .get_png(&routes::events::access_code_qr(event_id, access_id))
            .await
    }
}
