//! `/assets`: CRUD, bulk operations, QR generation, photo and history.

use super::{ApiClient, ApiError, Query};
use crate::models::{
    Asset, AssetEvent, AssetStatus, BulkAssetChanges, BulkDeleteRequest, BulkResult,
    BulkUpdateRequest, CreateAsset, Id, ImageUpdate, Page, PageRequest, QrCode, UpdateAsset,
    MAX_PAGE_SIZE,
};

/// Filters accepted by `GET /assets`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetFilter {
    pub classroom_id: Option<Id>,
    pub template_id: Option<Id>,
    pub status: Option<AssetStatus>,
    pub search: Option<String>,
}

impl AssetFilter {
    fn query(&self, page: PageRequest) -> Query {
        let mut query: Query = page.query_pairs().into();
        if let Some(id) = self.classroom_id {
            query.push(("classroom_id", id.to_string()));
        }
        if let Some(id) = self.template_id {
            query.push(("template_id", id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(s) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", s.trim().to_string()));
        }
        query
    }
}

impl ApiClient {
    pub async fn list_assets(
        &self,
        filter: &AssetFilter,
        page: PageRequest,
    ) -> Result<Page<Asset>, ApiError> {
        self.get("assets", &filter.query(page)).await
    }

    /// Walks every page of `GET /assets` (used by the spreadsheet export).
    ///
    /// Progress is tracked by the page number requested, never the one echoed
    /// back, so a server that repeats its last page still ends the walk.
    pub async fn list_all_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, ApiError> {
        let mut out = Vec::new();
        let mut page = PageRequest::new(1, MAX_PAGE_SIZE);
        loop {
            let batch = self.list_assets(filter, page).await?;
            let fetched = batch.items.len();
            if fetched == 0 {
                break;
            }
            let (total, pages) = (batch.total, batch.pages);
            out.extend(batch.items);

            let done = (pages > 0 && page.page >= pages)
                || (total > 0 && out.len() as u64 >= total)
                || (total == 0 && fetched < page.size as usize);
            if done {
                break;
            }
            page.page += 1;
        }
        tracing::debug!(count = out.len(), "fetched all assets");
        Ok(out)
    }

    pub async fn get_asset(&self, id: Id) -> Result<Asset, ApiError> {
        self.get(&format!("assets/{}", id), &[]).await
    }

    pub async fn create_asset(&self, body: &CreateAsset) -> Result<Asset, ApiError> {
        self.post("assets", body).await
    }

    pub async fn update_asset(&self, id: Id, body: &UpdateAsset) -> Result<Asset, ApiError> {
        self.put(&format!("assets/{}", id), body).await
    }

    pub async fn delete_asset(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("assets/{}", id)).await
    }

    pub async fn bulk_update_assets(
        &self,
        ids: &[Id],
        changes: &BulkAssetChanges,
    ) -> Result<BulkResult, ApiError> {
        let body = BulkUpdateRequest {
            ids: ids.to_vec(),
            changes: changes.clone(),
        };
        self.post("assets/bulk-update", &body).await
    }

    pub async fn bulk_delete_assets(&self, ids: &[Id]) -> Result<BulkResult, ApiError> {
        let body = BulkDeleteRequest { ids: ids.to_vec() };
        self.post("assets/bulk-delete", &body).await
    }

    /// Ask the server to (re)generate the asset's QR code.
    pub async fn generate_qr(&self, id: Id) -> Result<QrCode, ApiError> {
        self.post_empty(&format!("assets/{}/qr", id)).await
    }

    /// Replace the asset photo with a `data:` URL.
    pub async fn update_asset_image(&self, id: Id, data_url: String) -> Result<Asset, ApiError> {
        let body = ImageUpdate { image: data_url };
        self.put(&format!("assets/{}/image", id), &body).await
    }

    pub async fn list_asset_events(&self, id: Id) -> Result<Vec<AssetEvent>, ApiError> {
        self.get(&format!("assets/{}/events", id), &[]).await
    }
}
