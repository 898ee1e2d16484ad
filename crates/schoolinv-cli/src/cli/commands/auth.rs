//! `schoolinv login|register|logout|whoami`.

use anyhow::Result;
use schoolinv_core::models::{Credentials, RegisterUser};
use schoolinv_core::session::{self, Session};

use super::{password_or_prompt, Ctx};

pub async fn run_login(ctx: &Ctx, email: String, password: Option<String>) -> Result<()> {
    let credentials = Credentials {
        email: email.trim().to_string(),
        password: password_or_prompt(password)?,
    };
    let session = session::login(&ctx.cfg, &credentials).await?;
    session.save_to_path(&ctx.session_path)?;
    match &session.user {
        Some(user) => println!("Logged in as {} ({})", user.display_name(), user.role.as_str()),
        None => println!("Logged in as {}", credentials.email),
    }
    Ok(())
}

pub async fn run_register(
    ctx: &Ctx,
    email: String,
    full_name: Option<String>,
    invitation: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let body = RegisterUser {
        email: email.trim().to_string(),
        password: password_or_prompt(password)?,
        full_name,
        invitation_token: invitation,
    };
    let user = session::register(&ctx.cfg, &body).await?;
    println!("Registered {} ({}); now run `schoolinv login {}`", user.email, user.id, user.email);
    Ok(())
}

pub fn run_logout(ctx: &Ctx) -> Result<()> {
    if Session::remove_at(&ctx.session_path)? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub async fn run_whoami(ctx: &Ctx) -> Result<()> {
    let user = ctx.client()?.me().await?;
    println!("{} <{}>", user.display_name(), user.email);
    println!("role:   {}", user.role.as_str());
    println!("active: {}", user.is_active);
    if let Some(school) = user.school_id {
        println!("school: {}", school);
    }
    Ok(())
}
