//! REST resources of the inventory API.
//!
//! These mirror the server's JSON. The client never enforces uniqueness or
//! cascades; it keeps whatever snapshot the server last returned.

mod asset;
mod catalog;
mod incident;
mod page;
mod report;
mod school;
mod user;

pub use asset::{
    Asset, AssetEvent, AssetStatus, BulkAssetChanges, BulkDeleteRequest, BulkUpdateRequest,
    BulkResult, CreateAsset, ImageUpdate, QrCode, UpdateAsset,
};
pub use catalog::{
    AssetCategory, AssetTemplate, CreateCategory, CreateTemplate, UpdateCategory, UpdateTemplate,
};
pub use incident::{AssetIncident, CreateIncident, IncidentPriority, IncidentStatus, UpdateIncident};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use report::{NamedCount, ReportSummary};
pub use school::{Classroom, CreateClassroom, CreateSchool, School, UpdateClassroom, UpdateSchool};
pub use user::{
    AcceptInvitation, CreateInvitation, Credentials, Invitation, RegisterUser, TokenResponse,
    UpdateUser, User, UserRole,
};

/// Server-assigned identifier shared by every resource.
pub type Id = uuid::Uuid;

/// Timestamp as sent by the API (RFC 3339, UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
