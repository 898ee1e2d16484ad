//! Asset listing as an `.xlsx` workbook.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::models::Asset;

pub const ASSET_COLUMNS: [&str; 9] = [
    "ID",
    "Name",
    "Category",
    "Manufacturer",
    "Model",
    "Serial",
    "Status",
    "Classroom",
    "Created",
];

const SHEET_NAME: &str = "Assets";

/// One row of cells for `asset`, in [`ASSET_COLUMNS`] order.
pub fn asset_row(asset: &Asset) -> [String; 9] {
    let template = asset.template.as_ref();
    [
        asset.id.to_string(),
        asset.name().to_string(),
        asset.category_name().unwrap_or_default().to_string(),
        template
            .and_then(|t| t.manufacturer.clone())
            .unwrap_or_default(),
        template.and_then(|t| t.model.clone()).unwrap_or_default(),
        asset.serial_number.clone().unwrap_or_default(),
        asset.status.to_string(),
        asset
            .classroom
            .as_ref()
            .map(|c| c.display_name())
            .unwrap_or_default(),
        asset.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

/// Write a header row plus one row per asset; returns the number of asset rows.
pub fn write_assets_xlsx(assets: &[Asset], path: &Path) -> Result<usize> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in ASSET_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (i, asset) in assets.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in asset_row(asset).iter().enumerate() {
            sheet.write_string(row, col as u16, value)?;
        }
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("write workbook: {}", path.display()))?;
    tracing::info!(rows = assets.len(), path = %path.display(), "exported assets");
    Ok(assets.len())
}
