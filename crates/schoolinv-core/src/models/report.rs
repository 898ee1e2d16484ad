//! Aggregate report returned by `GET /reports/summary`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_assets: u64,
    /// Keyed by wire status name (`active`, `broken`, ...).
    #[serde(default)]
    pub assets_by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub assets_by_category: Vec<NamedCount>,
    #[serde(default)]
    pub assets_by_school: Vec<NamedCount>,
    #[serde(default)]
    pub open_incidents: u64,
    pub generated_at: Timestamp,
}

impl ReportSummary {
    /// Share of assets in `status`, in [0.0, 1.0].
    pub fn status_fraction(&self, status: &str) -> f64 {
        if self.total_assets == 0 {
            return 0.0;
        }
        let n = self.assets_by_status.get(status).copied().unwrap_or(0);
        (n as f64 / self.total_assets as f64).min(1.0)
    }
}
