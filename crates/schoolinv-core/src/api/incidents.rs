//! `/incidents`.

use chrono::Utc;

use super::{ApiClient, ApiError, Query};
use crate::models::{
    AssetIncident, CreateIncident, Id, IncidentStatus, Page, PageRequest, UpdateIncident,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentFilter {
    pub asset_id: Option<Id>,
    pub status: Option<IncidentStatus>,
}

impl ApiClient {
    pub async fn list_incidents(
        &self,
        filter: &IncidentFilter,
        page: PageRequest,
    ) -> Result<Page<AssetIncident>, ApiError> {
        let mut query: Query = page.query_pairs().into();
        if let Some(id) = filter.asset_id {
            query.push(("asset_id", id.to_string()));
        }
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        self.get("incidents", &query).await
    }

    pub async fn get_incident(&self, id: Id) -> Result<AssetIncident, ApiError> {
        self.get(&format!("incidents/{}", id), &[]).await
    }

    pub async fn create_incident(&self, body: &CreateIncident) -> Result<AssetIncident, ApiError> {
        self.post("incidents", body).await
    }

    pub async fn update_incident(
        &self,
        id: Id,
        body: &UpdateIncident,
    ) -> Result<AssetIncident, ApiError> {
        self.put(&format!("incidents/{}", id), body).await
    }

    /// Mark an incident resolved. The server stamps `resolved_at`.
    pub async fn resolve_incident(&self, id: Id) -> Result<AssetIncident, ApiError> {
        let body = UpdateIncident {
            status: Some(IncidentStatus::Resolved),
            ..Default::default()
        };
        let incident = self.update_incident(id, &body).await?;
        tracing::info!(incident = %id, at = %Utc::now(), "incident resolved");
        Ok(incident)
    }

    pub async fn delete_incident(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("incidents/{}", id)).await
    }
}
