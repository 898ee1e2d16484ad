//! CLI for the schoolinv school-asset inventory.

mod args;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use schoolinv_core::config;

pub use args::{
    AssetAction, CategoryAction, ClassroomAction, IncidentAction, InvitationAction, ListArgs,
    ReportAction, SchoolAction, TemplateAction, UserAction,
};

use commands::{
    run_assets, run_categories, run_classrooms, run_completions, run_incidents, run_invitations,
    run_login, run_logout, run_manpage, run_register, run_reports, run_schools, run_templates,
    run_users, run_whoami, Ctx,
};

/// Top-level CLI for the schoolinv inventory client.
#[derive(Debug, Parser)]
#[command(name = "schoolinv")]
#[command(about = "School asset inventory: records, QR stickers and label printing", long_about = None)]
pub struct Cli {
    /// Override `api_base_url` from the config file.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Log in and remember the session.
    Login {
        email: String,
        /// Prompted for, without echo, when omitted.
        #[arg(long, env = "SCHOOLINV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account (optionally from an invitation token).
    Register {
        email: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        invitation: Option<String>,
        /// Prompted for, without echo, when omitted.
        #[arg(long, env = "SCHOOLINV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Manage schools.
    #[command(subcommand)]
    Schools(SchoolAction),

    /// Manage classrooms.
    #[command(subcommand)]
    Classrooms(ClassroomAction),

    /// Manage asset categories.
    #[command(subcommand)]
    Categories(CategoryAction),

    /// Manage asset templates.
    #[command(subcommand)]
    Templates(TemplateAction),

    /// Manage assets, stickers and exports.
    #[command(subcommand)]
    Assets(AssetAction),

    /// Track incidents reported against assets.
    #[command(subcommand)]
    Incidents(IncidentAction),

    /// Manage user accounts.
    #[command(subcommand)]
    Users(UserAction),

    /// Manage invitations.
    #[command(subcommand)]
    Invitations(InvitationAction),

    /// Inventory reports.
    #[command(subcommand)]
    Reports(ReportAction),

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Commands that need neither config nor network.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell, Cli::command()),
            CliCommand::Manpage => return run_manpage(Cli::command()),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        if let Some(url) = cli.api_url.as_deref() {
            cfg.api_base_url = url.trim().to_string();
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let ctx = Ctx::new(cfg)?;

        match cli.command {
            CliCommand::Login { email, password } => run_login(&ctx, email, password).await?,
            CliCommand::Register {
                email,
                full_name,
                invitation,
                password,
            } => run_register(&ctx, email, full_name, invitation, password).await?,
            CliCommand::Logout => run_logout(&ctx)?,
            CliCommand::Whoami => run_whoami(&ctx).await?,
            CliCommand::Schools(action) => run_schools(&ctx, action).await?,
            CliCommand::Classrooms(action) => run_classrooms(&ctx, action).await?,
            CliCommand::Categories(action) => run_categories(&ctx, action).await?,
            CliCommand::Templates(action) => run_templates(&ctx, action).await?,
            CliCommand::Assets(action) => run_assets(&ctx, action).await?,
            CliCommand::Incidents(action) => run_incidents(&ctx, action).await?,
            CliCommand::Users(action) => run_users(&ctx, action).await?,
            CliCommand::Invitations(action) => run_invitations(&ctx, action).await?,
            CliCommand::Reports(action) => run_reports(&ctx, action).await?,
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
