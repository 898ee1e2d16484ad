//! `schoolinv assets ...`: records, bulk edits, QR stickers and exports.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use schoolinv_core::api::{ApiClient, AssetFilter};
use schoolinv_core::export;
use schoolinv_core::models::{BulkAssetChanges, CreateAsset, Id, UpdateAsset};
use schoolinv_core::photo;
use schoolinv_core::printer::PrinterSession;
use schoolinv_core::sticker;

use super::{or_dash, print_json, print_page_footer, Ctx};
use crate::cli::AssetAction;

pub async fn run_assets(ctx: &Ctx, action: AssetAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        AssetAction::List {
            list,
            classroom,
            template,
            status,
            search,
        } => {
            let filter = AssetFilter {
                classroom_id: classroom,
                template_id: template,
                status,
                search,
            };
            let page = client.list_assets(&filter, list.page_request()).await?;
            if page.is_empty() {
                println!("No assets.");
                return Ok(());
            }
            println!(
                "{:<36} {:<12} {:<16} {:<24} {}",
                "ID", "STATUS", "SERIAL", "NAME", "CLASSROOM"
            );
            for a in &page.items {
                let room = a
                    .classroom
                    .as_ref()
                    .map(|c| c.display_name())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<36} {:<12} {:<16} {:<24} {}",
                    a.id,
                    a.status,
                    or_dash(a.serial_number.as_deref()),
                    or_dash(Some(a.name())),
                    room
                );
            }
            print_page_footer(&page);
        }
        AssetAction::Show { id } => print_json(&client.get_asset(id).await?)?,
        AssetAction::Create {
            template,
            classroom,
            serial,
            status,
            purchase_date,
            notes,
        } => {
            let asset = client
                .create_asset(&CreateAsset {
                    template_id: template,
                    classroom_id: classroom,
                    serial_number: serial,
                    status,
                    purchase_date,
                    notes,
                })
                .await?;
            println!("Created asset {}", asset.id);
        }
        AssetAction::Update {
            id,
            template,
            classroom,
            serial,
            status,
            purchase_date,
            notes,
        } => {
            let asset = client
                .update_asset(
                    id,
                    &UpdateAsset {
                        template_id: template,
                        classroom_id: classroom,
                        serial_number: serial,
                        status,
                        purchase_date,
                        notes,
                    },
                )
                .await?;
            println!("Updated asset {} ({})", asset.id, asset.status);
        }
        AssetAction::Delete { id } => {
            client.delete_asset(id).await?;
            println!("Deleted asset {}", id);
        }
        AssetAction::BulkUpdate {
            ids,
            status,
            classroom,
        } => {
            let changes = BulkAssetChanges {
                status,
                classroom_id: classroom,
            };
            if changes.is_empty() {
                bail!("nothing to change: pass --status and/or --classroom");
            }
            let result = client.bulk_update_assets(&ids, &changes).await?;
            println!("Updated {} asset(s)", result.affected);
        }
        AssetAction::BulkDelete { ids } => {
            let result = client.bulk_delete_assets(&ids).await?;
            println!("Deleted {} asset(s)", result.affected);
        }
        AssetAction::Qr { id } => {
            let qr = client.generate_qr(id).await?;
            println!("QR {} -> {}", qr.id, qr.url);
        }
        AssetAction::SetImage { id, path } => {
            let data_url = photo::load_data_url(&path, ctx.cfg.max_image_bytes())?;
            client.update_asset_image(id, data_url).await?;
            println!("Updated photo of asset {}", id);
        }
        AssetAction::Events { id } => {
            let events = client.list_asset_events(id).await?;
            if events.is_empty() {
                println!("No events.");
            }
            for e in events {
                println!(
                    "{}  {:<16} {}",
                    e.created_at.format("%Y-%m-%d %H:%M"),
                    e.event_type,
                    or_dash(e.description.as_deref())
                );
            }
        }
        AssetAction::Export {
            out,
            classroom,
            status,
            search,
        } => {
            let filter = AssetFilter {
                classroom_id: classroom,
                status,
                search,
                ..Default::default()
            };
            let assets = client.list_all_assets(&filter).await?;
            let rows = export::write_assets_xlsx(&assets, &out)?;
            println!("Wrote {} asset(s) to {}", rows, out.display());
        }
        AssetAction::Sticker { id, out } => {
            let asset = client.get_asset(id).await?;
            let markup = sticker::render_asset(&asset, &ctx.cfg.app_base_url);
            write_markup(&markup, out.as_deref())?;
        }
        AssetAction::Print { ids } => run_print(ctx, &client, &ids).await?,
    }
    Ok(())
}

fn write_markup(markup: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, markup)
                .with_context(|| format!("write sticker: {}", path.display()))?;
            println!("Wrote sticker to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(markup.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Fetch every asset first so a bad id fails before anything is printed.
async fn run_print(ctx: &Ctx, client: &ApiClient, ids: &[Id]) -> Result<()> {
    let mut jobs = Vec::with_capacity(ids.len());
    for id in ids {
        let asset = client.get_asset(*id).await?;
        jobs.push((asset.id, sticker::render_asset(&asset, &ctx.cfg.app_base_url)));
    }

    let printer = ctx.cfg.printer();
    let pacing = printer.pacing();
    let session = PrinterSession::new(printer, pacing);
    for (id, markup) in jobs {
        let report = session
            .print(&markup)
            .await
            .with_context(|| format!("print sticker for {}", id))?;
        println!("Printed {} ({} bytes, {} frames)", id, report.bytes, report.frames);
    }
    Ok(())
}
