//! Pretty-printed JSON snapshot of the report summary.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{ReportSummary, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSnapshot {
    pub exported_at: Timestamp,
    #[serde(flatten)]
    pub summary: ReportSummary,
}

impl ReportSnapshot {
    pub fn now(summary: ReportSummary) -> Self {
        Self {
            exported_at: Utc::now(),
            summary,
        }
    }
}

pub fn write_report_json(snapshot: &ReportSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("serialize report")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_flat_and_reloadable() {
        let summary: ReportSummary = serde_json::from_str(
            r#"{
                "total_assets": 12,
                "assets_by_status": { "active": 9, "lost": 3 },
                "assets_by_category": [{ "name": "Mobiliario", "count": 12 }],
                "open_incidents": 2,
                "generated_at": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        let snapshot = ReportSnapshot::now(summary.clone());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report_json(&snapshot, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("exported_at").is_some());
        assert_eq!(value["total_assets"], 12);
        assert_eq!(value["assets_by_status"]["lost"], 3);

        let back: ReportSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back.summary, summary);
    }
}
