//! `/asset-categories` and `/asset-templates`.

use super::{ApiClient, ApiError, Query};
use crate::models::{
    AssetCategory, AssetTemplate, CreateCategory, CreateTemplate, Id, Page, PageRequest,
    UpdateCategory, UpdateTemplate,
};

impl ApiClient {
    pub async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<AssetCategory>, ApiError> {
        let query: Query = page.query_pairs().into();
        self.get("asset-categories", &query).await
    }

    pub async fn get_category(&self, id: Id) -> Result<AssetCategory, ApiError> {
        self.get(&format!("asset-categories/{}", id), &[]).await
    }

    pub async fn create_category(&self, body: &CreateCategory) -> Result<AssetCategory, ApiError> {
        self.post("asset-categories", body).await
    }

    pub async fn update_category(
        &self,
        id: Id,
        body: &UpdateCategory,
    ) -> Result<AssetCategory, ApiError> {
        self.put(&format!("asset-categories/{}", id), body).await
    }

    pub async fn delete_category(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("asset-categories/{}", id)).await
    }

    pub async fn list_templates(
        &self,
        category_id: Option<Id>,
        page: PageRequest,
    ) -> Result<Page<AssetTemplate>, ApiError> {
        let mut query: Query = page.query_pairs().into();
        if let Some(id) = category_id {
            query.push(("category_id", id.to_string()));
        }
        self.get("asset-templates", &query).await
    }

    pub async fn get_template(&self, id: Id) -> Result<AssetTemplate, ApiError> {
        self.get(&format!("asset-templates/{}", id), &[]).await
    }

    pub async fn create_template(&self, body: &CreateTemplate) -> Result<AssetTemplate, ApiError> {
        self.post("asset-templates", body).await
    }

    pub async fn update_template(
        &self,
        id: Id,
        body: &UpdateTemplate,
    ) -> Result<AssetTemplate, ApiError> {
        self.put(&format!("asset-templates/{}", id), body).await
    }

    pub async fn delete_template(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("asset-templates/{}", id)).await
    }
}
