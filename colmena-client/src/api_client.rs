use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use colmena_model::AuthToken;

use crate::error::{ClientError, Result};
use crate::token::{MemoryTokenStore, TokenStore};

/// Connection knobs for [`ApiClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://api.colmena.club`.
    pub base_url: String,
    /// Hard request timeout applied to every call.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Read the base URL from `COLMENA_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("COLMENA_API_URL") {
            let trimmed = value.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }
        config
    }
}

/// HTTP client for the Colmena backend with bearer authentication.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token_store.load().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client with an in-memory token store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_token_store(config, MemoryTokenStore::shared())
    }

    /// Create a client backed by the given token store.
    pub fn with_token_store(config: ClientConfig, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::BaseUrl(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        info!("[ApiClient] base URL: {}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_store,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a route path onto the base URL. Absolute URLs pass through,
    /// so backend-provided `qr_url` values work directly.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Store the bearer token pair.
    pub fn set_token(&self, token: &AuthToken) {
        self.token_store.save(token);
    }

    /// Read the stored token, if any.
    pub fn token(&self) -> Option<AuthToken> {
        self.token_store.load()
    }

    /// Drop the stored token.
    pub fn clear_token(&self) {
        self.token_store.clear();
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token_store.load() {
            builder.header("Authorization", format!("Bearer {}", token.access_token))
        } else {
            builder
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.status_error(status, response).await)
        }
    }

    /// A rejected bearer is useless; drop it so the next login starts
    /// clean, matching the frontend's behavior.
    fn invalidate_on_unauthorized(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            warn!("[ApiClient] 401 received, clearing stored token");
            self.token_store.clear();
        }
    }

    /// Shape a non-2xx response into `ClientError::Status`, preferring the
    /// backend's own `message`/`error`/`msg` text when the body is JSON.
    async fn status_error(&self, status: StatusCode, response: Response) -> ClientError {
        self.invalidate_on_unauthorized(status);

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| extract_message(&body))
            .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));

        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// GET request with authentication.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!("GET {url}");
        let request = self.authorize(self.client.get(&url));
        self.execute(request).await
    }

    /// GET request for public endpoints (no bearer attached).
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!("GET (public) {url}");
        self.execute(self.client.get(&url)).await
    }

    /// POST request with a JSON body and authentication.
    pub async fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, body: &T) -> Result<R> {
        let url = self.build_url(path);
        debug!("POST {url}");
        let request = self.authorize(self.client.post(&url).json(body));
        self.execute(request).await
    }

    /// POST request with a JSON body, never attaching a bearer. Login uses
    /// this so a stale token from a previous session is not sent along.
    pub async fn post_public<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R> {
        let url = self.build_url(path);
        debug!("POST (public) {url}");
        self.execute(self.client.post(&url).json(body)).await
    }

    /// Bodyless authenticated POST, used by the check-in and access-check
    /// endpoints where the code travels in the path.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.build_url(path);
        debug!("POST {url}");
        let request = self.authorize(self.client.post(&url));
        self.execute(request).await
    }

    /// PUT request with a JSON body and authentication.
    pub async fn put<T: Serialize, R: DeserializeOwned>(&self, path: &str, body: &T) -> Result<R> {
        let url = self.build_url(path);
        debug!("PUT {url}");
        let request = self.authorize(self.client.put(&url).json(body));
        self.execute(request).await
    }

    /// DELETE request with authentication.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.build_url(path);
        debug!("DELETE {url}");
        let request = self.authorize(self.client.delete(&url));
        self.execute(request).await
    }

    /// DELETE request for endpoints that answer 200/204 with no usable body.
    pub async fn delete_no_content(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        debug!("DELETE {url}");
        let request = self.authorize(self.client.delete(&url));
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.status_error(status, response).await)
        }
    }

    /// Authenticated GET returning raw bytes, for the QR PNG endpoints.
    pub async fn get_png(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.build_url(path);
        debug!("GET (png) {url}");
        let request = self.authorize(self.client.get(&url)).header("Accept", "image/png");
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(self.status_error(status, response).await)
        }
    }
}

fn extract_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| body.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
