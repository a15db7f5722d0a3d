use log::info;

use colmena_model::{
    DeleteUserResponse, LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    UserList,
};

use crate::api_client::ApiClient;
use crate::error::Result;
use crate::routes;

/// Authentication operations against `/api/auth`.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in and store the returned token pair on the shared client.
    ///
    /// Sent without a bearer so a stale token from an earlier session can
    /// never shadow the fresh credentials.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse> {
        let response: LoginResponse = self.api.post_public(routes::auth::LOGIN, payload).await?;
        self.api.set_token(&response.token());
        info!("[AuthService] logged in as {}", response.user.email);
        Ok(response)
    }

    /// Clear the stored token pair. Purely local; the backend keeps no
    /// session state for bearer tokens.
    pub fn logout(&self) {
        self.api.clear_token();
    }

    /// Identity of the currently authenticated user.
    pub async fn me(&self) -> Result<MeResponse> {
        self.api.get(routes::auth::ME).await
    }

    /// Admin: create a user account.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<RegisterResponse> {
        self.api.post(routes::auth::REGISTER, payload).await
    }

    /// Admin: list all user accounts.
    pub async fn list_users(&self) -> Result<UserList> {
        self.api.get(routes::auth::USERS).await
    }

    /// Admin: delete a user account.
    pub async fn delete_user(&self, user_id: i64) -> Result<DeleteUserResponse> {
        self.api.delete(&routes::auth::user(user_id)).await
    }
}
