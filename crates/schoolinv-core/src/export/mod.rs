//! File exports: an Excel sheet of assets and a JSON report snapshot.

mod report;
mod xlsx;

pub use report::{write_report_json, ReportSnapshot};
pub use xlsx::{asset_row, write_assets_xlsx, ASSET_COLUMNS};
