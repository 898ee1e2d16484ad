//! `schoolinv reports summary`.

use anyhow::Result;
use schoolinv_core::export::{self, ReportSnapshot};

use super::Ctx;
use crate::cli::ReportAction;

pub async fn run_reports(ctx: &Ctx, action: ReportAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        ReportAction::Summary { out } => {
            let summary = client.report_summary().await?;
            println!("Assets:         {}", summary.total_assets);
            println!("Open incidents: {}", summary.open_incidents);
            if !summary.assets_by_status.is_empty() {
                println!();
                println!("{:<14} {:>6} {:>6}", "STATUS", "COUNT", "SHARE");
                for (status, count) in &summary.assets_by_status {
                    println!(
                        "{:<14} {:>6} {:>5.1}%",
                        status,
                        count,
                        summary.status_fraction(status) * 100.0
                    );
                }
            }
            if !summary.assets_by_category.is_empty() {
                println!();
                println!("{:<24} {:>6}", "CATEGORY", "COUNT");
                for c in &summary.assets_by_category {
                    println!("{:<24} {:>6}", c.name, c.count);
                }
            }
            if !summary.assets_by_school.is_empty() {
                println!();
                println!("{:<24} {:>6}", "SCHOOL", "COUNT");
                for s in &summary.assets_by_school {
                    println!("{:<24} {:>6}", s.name, s.count);
                }
            }
            if let Some(path) = out {
                export::write_report_json(&ReportSnapshot::now(summary), &path)?;
                println!();
                println!("Saved snapshot to {}", path.display());
            }
        }
    }
    Ok(())
}
