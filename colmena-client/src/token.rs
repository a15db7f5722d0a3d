use std::sync::Arc;

use colmena_model::AuthToken;
use parking_lot::RwLock;

/// Bearer-token storage contract: store, read back, clear.
///
/// The web frontend kept the pair in `localStorage`; here the mechanics are
/// up to the embedder. Reads happen on every authenticated request, so
/// implementations should be cheap and must not block for long.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<AuthToken>;
    fn save(&self, token: &AuthToken);
    fn clear(&self);
}

/// In-memory token store, the default for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    fn save(&self, token: &AuthToken) {
        *self.token.write() = Some(token.clone());
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}
