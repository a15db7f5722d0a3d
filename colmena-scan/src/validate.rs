use async_trait::async_trait;

use colmena_client::{ApiClient, ClientError, EventAccessService, ReservationsService};
use colmena_model::{AccessCheckResponse, CheckinResponse};

/// The two backend checks a scan can dispatch to.
///
/// Exactly one of these runs per accepted target. Business rejections come
/// back as `Ok` with `ok = false`; only transport-level problems are `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanValidator: Send + Sync {
    /// One-shot reservation check-in.
    async fn checkin(&self, code: &str) -> Result<CheckinResponse, ClientError>;

    /// Unlimited access-code check (increments the backend counter).
    async fn check_access(&self, code: &str) -> Result<AccessCheckResponse, ClientError>;
}

/// Production validator over the REST client.
#[derive(Debug, Clone)]
pub struct RemoteValidator {
    reservations: ReservationsService,
    access: EventAccessService,
}

impl RemoteValidator {
    pub fn new(api: ApiClient) -> Self {
        Self {
            reservations: ReservationsService::new(api.clone()),
            access: EventAccessService::new(api),
        }
    }
}

#[async_trait]
impl ScanValidator for RemoteValidator {
    async fn checkin(&self, code: &str) -> Result<CheckinResponse, ClientError> {
        self.reservations.checkin(code).await
    }

    async fn check_access(&self, code: &str) -> Result<AccessCheckResponse, ClientError> {
        self.access.check(code).await
    }
}
