//! `schoolinv categories ...` and `schoolinv templates ...`.

use anyhow::Result;
use schoolinv_core::models::{CreateCategory, CreateTemplate, UpdateCategory, UpdateTemplate};

use super::{or_dash, print_json, print_page_footer, Ctx};
use crate::cli::{CategoryAction, TemplateAction};

pub async fn run_categories(ctx: &Ctx, action: CategoryAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        CategoryAction::List { list } => {
            let page = client.list_categories(list.page_request()).await?;
            if page.is_empty() {
                println!("No categories.");
                return Ok(());
            }
            println!("{:<36} {}", "ID", "NAME");
            for c in &page.items {
                println!("{:<36} {}", c.id, c.name);
            }
            print_page_footer(&page);
        }
        CategoryAction::Show { id } => print_json(&client.get_category(id).await?)?,
        CategoryAction::Create { name, description } => {
            let c = client
                .create_category(&CreateCategory { name, description })
                .await?;
            println!("Created category {} ({})", c.name, c.id);
        }
        CategoryAction::Update {
            id,
            name,
            description,
        } => {
            let c = client
                .update_category(id, &UpdateCategory { name, description })
                .await?;
            println!("Updated category {} ({})", c.name, c.id);
        }
        CategoryAction::Delete { id } => {
            client.delete_category(id).await?;
            println!("Deleted category {}", id);
        }
    }
    Ok(())
}

pub async fn run_templates(ctx: &Ctx, action: TemplateAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        TemplateAction::List { list, category } => {
            let page = client.list_templates(category, list.page_request()).await?;
            if page.is_empty() {
                println!("No templates.");
                return Ok(());
            }
            println!("{:<36} {:<16} {:<16} {}", "ID", "MANUFACTURER", "MODEL", "NAME");
            for t in &page.items {
                println!(
                    "{:<36} {:<16} {:<16} {}",
                    t.id,
                    or_dash(t.manufacturer.as_deref()),
                    or_dash(t.model.as_deref()),
                    t.name
                );
            }
            print_page_footer(&page);
        }
        TemplateAction::Show { id } => print_json(&client.get_template(id).await?)?,
        TemplateAction::Create {
            name,
            category,
            manufacturer,
            model,
            description,
        } => {
            let t = client
                .create_template(&CreateTemplate {
                    name,
                    category_id: category,
                    manufacturer,
                    model,
                    description,
                })
                .await?;
            println!("Created template {} ({})", t.name, t.id);
        }
        TemplateAction::Update {
            id,
            name,
            category,
            manufacturer,
            model,
            description,
        } => {
            let t = client
                .update_template(
                    id,
                    &UpdateTemplate {
                        name,
                        category_id: category,
                        manufacturer,
                        model,
                        description,
                    },
                )
                .await?;
            println!("Updated template {} ({})", t.name, t.id);
        }
        TemplateAction::Delete { id } => {
            client.delete_template(id).await?;
            println!("Deleted template {}", id);
        }
    }
    Ok(())
}
