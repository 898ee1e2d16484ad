//! `/reports`: dashboard summary counts.

use super::{ApiClient, ApiError};
use crate::models::ReportSummary;

impl ApiClient {
    pub async fn report_summary(&self) -> Result<ReportSummary, ApiError> {
        self.get("reports/summary", &[]).await
    }
}
