use async_trait::async_trait;
use thiserror::Error;

/// Failure to bring the decode loop up.
///
/// Surfaced as a persistent inline state on the scan screen, never as a
/// per-scan dialog; it does not touch the admission gate.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// Control handle over the camera decode loop.
///
/// The dispatcher owns this exclusively for the lifetime of the screen and
/// brackets every validation with one `stop` and one later `start`. `stop`
/// is expected to be idempotent; `start` may fail with a device or
/// permission error.
#[async_trait]
pub trait CameraControl: Send + Sync {
    async fn start(&self) -> Result<(), CameraError>;
    async fn stop(&self);
}
