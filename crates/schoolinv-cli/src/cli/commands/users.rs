//! `schoolinv users ...` and `schoolinv invitations ...`.

use anyhow::Result;
use chrono::Utc;
use schoolinv_core::models::{AcceptInvitation, CreateInvitation, UpdateUser};
use schoolinv_core::session;

use super::{password_or_prompt, print_json, print_page_footer, Ctx};
use crate::cli::{InvitationAction, UserAction};

pub async fn run_users(ctx: &Ctx, action: UserAction) -> Result<()> {
    let client = ctx.client()?;
    match action {
        UserAction::List { list, search } => {
            let page = client
                .list_users(search.as_deref(), list.page_request())
                .await?;
            if page.is_empty() {
                println!("No users.");
                return Ok(());
            }
            println!("{:<36} {:<8} {:<7} {}", "ID", "ROLE", "ACTIVE", "USER");
            for u in &page.items {
                println!(
                    "{:<36} {:<8} {:<7} {} <{}>",
                    u.id,
                    u.role.as_str(),
                    if u.is_active { "yes" } else { "no" },
                    u.display_name(),
                    u.email
                );
            }
            print_page_footer(&page);
        }
        UserAction::Show { id } => print_json(&client.get_user(id).await?)?,
        UserAction::Update {
            id,
            full_name,
            role,
            school,
        } => {
            let user = client
                .update_user(
                    id,
                    &UpdateUser {
                        full_name,
                        role,
                        school_id: school,
                    },
                )
                .await?;
            println!("Updated user {}", user.email);
        }
        UserAction::Activate { id } => {
            let user = client.activate_user(id).await?;
            println!("Activated {}", user.email);
        }
        UserAction::Deactivate { id } => {
            let user = client.deactivate_user(id).await?;
            println!("Deactivated {}", user.email);
        }
        UserAction::Delete { id } => {
            client.delete_user(id).await?;
            println!("Deleted user {}", id);
        }
    }
    Ok(())
}

pub async fn run_invitations(ctx: &Ctx, action: InvitationAction) -> Result<()> {
    // Accepting needs no prior login.
    if let InvitationAction::Accept {
        token,
        full_name,
        password,
    } = action
    {
        let body = AcceptInvitation {
            password: password_or_prompt(password)?,
            full_name,
        };
        let session = session::accept_invitation(&ctx.cfg, &token, &body).await?;
        session.save_to_path(&ctx.session_path)?;
        match &session.user {
            Some(u) => println!("Invitation accepted; logged in as {}", u.email),
            None => println!("Invitation accepted; logged in"),
        }
        return Ok(());
    }

    let client = ctx.client()?;
    match action {
        InvitationAction::List { list } => {
            let page = client.list_invitations(list.page_request()).await?;
            if page.is_empty() {
                println!("No invitations.");
                return Ok(());
            }
            let now = Utc::now();
            println!("{:<36} {:<8} {:<9} {}", "ID", "ROLE", "STATE", "EMAIL");
            for inv in &page.items {
                let state = if inv.accepted {
                    "accepted"
                } else if inv.is_expired(now) {
                    "expired"
                } else {
                    "pending"
                };
                println!(
                    "{:<36} {:<8} {:<9} {}",
                    inv.id,
                    inv.role.as_str(),
                    state,
                    inv.email
                );
            }
            print_page_footer(&page);
        }
        InvitationAction::Create {
            email,
            role,
            school,
        } => {
            let inv = client
                .create_invitation(&CreateInvitation {
                    email,
                    role,
                    school_id: school,
                })
                .await?;
            println!("Invited {} as {}", inv.email, inv.role.as_str());
            if let Some(token) = inv.token.as_deref() {
                println!("token: {}", token);
            }
        }
        InvitationAction::Revoke { id } => {
            client.revoke_invitation(id).await?;
            println!("Revoked invitation {}", id);
        }
        InvitationAction::Accept { .. } => {}
    }
    Ok(())
}
