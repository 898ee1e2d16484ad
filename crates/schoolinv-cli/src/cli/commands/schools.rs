//! `schoolinv schools ...` and `schoolinv classrooms ...`.

use anyhow::Result;
use schoolinv_core::models::{CreateClassroom, CreateSchool, UpdateClassroom, UpdateSchool};

use super::{or_dash, print_json, print_page_footer, Ctx};
use crate::cli::{ClassroomAction, SchoolAction};

pub async fn run_schools(ctx: &Ctx, action: SchoolAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        SchoolAction::List { list, search } => {
            let page = client
                .list_schools(search.as_deref(), list.page_request())
                .await?;
            if page.is_empty() {
                println!("No schools.");
                return Ok(());
            }
            println!("{:<36} {:<12} {}", "ID", "CODE", "NAME");
            for s in &page.items {
                println!("{:<36} {:<12} {}", s.id, or_dash(s.code.as_deref()), s.name);
            }
            print_page_footer(&page);
        }
        SchoolAction::Show { id } => print_json(&client.get_school(id).await?)?,
        SchoolAction::Create {
            name,
            address,
            code,
        } => {
            let school = client
                .create_school(&CreateSchool {
                    name,
                    address,
                    code,
                })
                .await?;
            println!("Created school {} ({})", school.name, school.id);
        }
        SchoolAction::Update {
            id,
            name,
            address,
            code,
        } => {
            let school = client
                .update_school(
                    id,
                    &UpdateSchool {
                        name,
                        address,
                        code,
                    },
                )
                .await?;
            println!("Updated school {} ({})", school.name, school.id);
        }
        SchoolAction::Delete { id } => {
            client.delete_school(id).await?;
            println!("Deleted school {}", id);
        }
    }
    Ok(())
}

pub async fn run_classrooms(ctx: &Ctx, action: ClassroomAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        ClassroomAction::List { list, school } => {
            let page = client.list_classrooms(school, list.page_request()).await?;
            if page.is_empty() {
                println!("No classrooms.");
                return Ok(());
            }
            println!("{:<36} {:<8} {:<8} {}", "ID", "FLOOR", "SEATS", "NAME");
            for c in &page.items {
                let seats = c
                    .capacity
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<36} {:<8} {:<8} {}",
                    c.id,
                    or_dash(c.floor.as_deref()),
                    seats,
                    c.display_name()
                );
            }
            print_page_footer(&page);
        }
        ClassroomAction::Show { id } => print_json(&client.get_classroom(id).await?)?,
        ClassroomAction::Create {
            name,
            school,
            floor,
            capacity,
        } => {
            let room = client
                .create_classroom(&CreateClassroom {
                    name,
                    school_id: school,
                    floor,
                    capacity,
                })
                .await?;
            println!("Created classroom {} ({})", room.name, room.id);
        }
        ClassroomAction::Update {
            id,
            name,
            school,
            floor,
            capacity,
        } => {
            let room = client
                .update_classroom(
                    id,
                    &UpdateClassroom {
                        name,
                        school_id: school,
                        floor,
                        capacity,
                    },
                )
                .await?;
            println!("Updated classroom {} ({})", room.name, room.id);
        }
        ClassroomAction::Delete { id } => {
            client.delete_classroom(id).await?;
            println!("Deleted classroom {}", id);
        }
    }
    Ok(())
}
