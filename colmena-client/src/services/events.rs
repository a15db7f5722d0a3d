use colmena_model::{Event, EventCreate, EventList, EventUpdate};

use crate::api_client::ApiClient;
use crate::error::Result;
use crate::routes;

/// Event catalog operations against `/api/events`.
#[derive(Debug, Clone)]
pub struct EventsService {
    api: ApiClient,
}

impl EventsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Public: list visible events.
    pub async fn list(&self) -> Result<EventList> {
        self.api.get_public(routes::events::COLLECTION).await
    }

    /// Public: fetch one event by id.
    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.api.get_public(&routes::events::item(event_id)).await
    }

    /// Public: fetch one event by its public reservation code.
    pub async fn get_by_code(&self, public_code: &str) -> Result<Event> {
        self.api.get_public(&routes::events::public(public_code)).await
    }

    /// Public: the event's reservation QR as PNG bytes.
    pub async fn qr_png(&self, event_id: i64) -> Result<Vec<u8>> {
        self.api.get_png(&routes::events::qr(event_id)).await
    }

    /// Admin: create an event.
    pub async fn create(&self, payload: &EventCreate) -> Result<Event> {
        self.api.post(routes::events::COLLECTION, payload).await
    }

    /// Admin: update an event.
    pub async fn update(&self, event_id: i64, payload: &EventUpdate) -> Result<Event> {
        self.api.put(&routes::events::item(event_id), payload).await
    }

    /// Admin: delete an event.
    pub async fn delete(&self, event_id: i64) -> Result<()> {
        self.api.delete_no_content(&routes::events::item(event_id)).await
    }
}
