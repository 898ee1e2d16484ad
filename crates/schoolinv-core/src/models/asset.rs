//! Tagged physical assets, their QR codes and history events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AssetTemplate, Classroom, Id, Timestamp};

/// Lifecycle state of an asset as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    Maintenance,
    Broken,
    Retired,
    Lost,
    /// A status this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::Broken => "broken",
            AssetStatus::Retired => "retired",
            AssetStatus::Lost => "lost",
            AssetStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(AssetStatus::Active),
            "maintenance" => Some(AssetStatus::Maintenance),
            "broken" => Some(AssetStatus::Broken),
            "retired" => Some(AssetStatus::Retired),
            "lost" => Some(AssetStatus::Lost),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: Id,
    pub template_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Photo as a URL or data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<AssetTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom: Option<Classroom>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    /// Template name, or an empty string when the template is not embedded.
    pub fn name(&self) -> &str {
        self.template.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    pub fn category_name(&self) -> Option<&str> {
        self.template
            .as_ref()
            .and_then(|t| t.category.as_ref())
            .map(|c| c.name.as_str())
    }

    /// Deep link to the asset detail page of the web app.
    pub fn detail_url(&self, app_base_url: &str) -> String {
        format!("{}/assets/{}", app_base_url.trim_end_matches('/'), self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrCode {
    pub id: Id,
    pub asset_id: Id,
    /// Payload encoded in the code.
    pub url: String,
    /// Rendered PNG, base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: Timestamp,
}

/// Entry in an asset's history (moved, repaired, status changed...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetEvent {
    pub id: Id,
    pub asset_id: Id,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub template_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields a bulk update may change on every selected asset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BulkAssetChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<Id>,
}

impl BulkAssetChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.classroom_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub ids: Vec<Id>,
    pub changes: BulkAssetChanges,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Id>,
}

/// Number of rows a bulk operation touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkResult {
    pub affected: u64,
}

/// Body of `PUT /assets/{id}/image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpdate {
    /// `data:<mime>;base64,<payload>`.
    pub image: String,
}
