//! `/users` administration and `/invitations`.

use super::{ApiClient, ApiError, Query};
use crate::models::{
    AcceptInvitation, CreateInvitation, Id, Invitation, Page, PageRequest, TokenResponse,
    UpdateUser, User,
};

impl ApiClient {
    pub async fn list_users(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let mut query: Query = page.query_pairs().into();
        if let Some(s) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", s.trim().to_string()));
        }
        self.get("users", &query).await
    }

    pub async fn get_user(&self, id: Id) -> Result<User, ApiError> {
        self.get(&format!("users/{}", id), &[]).await
    }

    pub async fn update_user(&self, id: Id, body: &UpdateUser) -> Result<User, ApiError> {
        self.put(&format!("users/{}", id), body).await
    }

    pub async fn activate_user(&self, id: Id) -> Result<User, ApiError> {
        self.post_empty(&format!("users/{}/activate", id)).await
    }

    pub async fn deactivate_user(&self, id: Id) -> Result<User, ApiError> {
        self.post_empty(&format!("users/{}/deactivate", id)).await
    }

    pub async fn delete_user(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("users/{}", id)).await
    }

    pub async fn list_invitations(&self, page: PageRequest) -> Result<Page<Invitation>, ApiError> {
        let query: Query = page.query_pairs().into();
        self.get("invitations", &query).await
    }

    pub async fn create_invitation(&self, body: &CreateInvitation) -> Result<Invitation, ApiError> {
        self.post("invitations", body).await
    }

    pub async fn revoke_invitation(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("invitations/{}", id)).await
    }

    /// Accept an invitation by its token; the server creates the account and logs it in.
    pub async fn accept_invitation(
        &self,
        token: &str,
        body: &AcceptInvitation,
    ) -> Result<TokenResponse, ApiError> {
        let token = url::form_urlencoded::byte_serialize(token.trim().as_bytes()).collect::<String>();
        self.post(&format!("invitations/{}/accept", token), body).await
    }
}
