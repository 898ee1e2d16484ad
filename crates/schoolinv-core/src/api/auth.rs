//! `/auth`: login, registration and the current user.

use super::{ApiClient, ApiError};
use crate::models::{Credentials, RegisterUser, TokenResponse, User};

impl ApiClient {
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.post("auth/login", credentials).await
    }

    pub async fn register(&self, body: &RegisterUser) -> Result<User, ApiError> {
        self.post("auth/register", body).await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("auth/me", &[]).await
    }
}
