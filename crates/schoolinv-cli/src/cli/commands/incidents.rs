//! `schoolinv incidents ...`.

use anyhow::Result;
use schoolinv_core::api::IncidentFilter;
use schoolinv_core::models::{CreateIncident, UpdateIncident};

use super::{print_json, print_page_footer, Ctx};
use crate::cli::IncidentAction;

pub async fn run_incidents(ctx: &Ctx, action: IncidentAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        IncidentAction::List { list, asset, status } => {
            let filter = IncidentFilter {
                asset_id: asset,
                status,
            };
            let page = client.list_incidents(&filter, list.page_request()).await?;
            if page.is_empty() {
                println!("No incidents.");
                return Ok(());
            }
            println!(
                "{:<36} {:<12} {:<9} {:<36} {}",
                "ID", "STATUS", "PRIORITY", "ASSET", "TITLE"
            );
            for i in &page.items {
                println!(
                    "{:<36} {:<12} {:<9} {:<36} {}",
                    i.id,
                    i.status.as_str(),
                    i.priority.as_str(),
                    i.asset_id,
                    i.title
                );
            }
            print_page_footer(&page);
        }
        IncidentAction::Show { id } => print_json(&client.get_incident(id).await?)?,
        IncidentAction::Create {
            asset,
            title,
            description,
            priority,
        } => {
            let incident = client
                .create_incident(&CreateIncident {
                    asset_id: asset,
                    title,
                    description,
                    priority,
                })
                .await?;
            println!("Opened incident {}", incident.id);
        }
        IncidentAction::Update {
            id,
            title,
            description,
            status,
            priority,
        } => {
            let incident = client
                .update_incident(
                    id,
                    &UpdateIncident {
                        title,
                        description,
                        status,
                        priority,
                    },
                )
                .await?;
            println!("Updated incident {} ({})", incident.id, incident.status.as_str());
        }
        IncidentAction::Resolve { id } => {
            let incident = client.resolve_incident(id).await?;
            println!("Resolved incident {}", incident.id);
        }
        IncidentAction::Delete { id } => {
            client.delete_incident(id).await?;
            println!("Deleted incident {}", id);
        }
    }
    Ok(())
}
