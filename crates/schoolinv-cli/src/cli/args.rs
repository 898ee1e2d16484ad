//! Per-resource subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use schoolinv_core::models::{
    AssetStatus, Id, IncidentPriority, IncidentStatus, PageRequest, UserRole, DEFAULT_PAGE_SIZE,
};

fn asset_status(s: &str) -> Result<AssetStatus, String> {
    AssetStatus::parse(s)
        .ok_or_else(|| format!("unknown status {:?} (active, maintenance, broken, retired, lost)", s))
}

fn incident_status(s: &str) -> Result<IncidentStatus, String> {
    IncidentStatus::parse(s)
        .ok_or_else(|| format!("unknown status {:?} (open, in_progress, resolved, closed)", s))
}

fn incident_priority(s: &str) -> Result<IncidentPriority, String> {
    IncidentPriority::parse(s)
        .ok_or_else(|| format!("unknown priority {:?} (low, medium, high, critical)", s))
}

fn user_role(s: &str) -> Result<UserRole, String> {
    UserRole::parse(s).ok_or_else(|| format!("unknown role {:?} (admin, manager, staff, viewer)", s))
}

/// Paging flags shared by every `list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

impl ListArgs {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

#[derive(Debug, Subcommand)]
pub enum SchoolAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: Id,
    },
    Create {
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClassroomAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        school: Option<Id>,
    },
    Show {
        id: Id,
    },
    Create {
        name: String,
        #[arg(long)]
        school: Id,
        #[arg(long)]
        floor: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        school: Option<Id>,
        #[arg(long)]
        floor: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    Show {
        id: Id,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        category: Option<Id>,
    },
    Show {
        id: Id,
    },
    Create {
        name: String,
        #[arg(long)]
        category: Id,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<Id>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssetAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        classroom: Option<Id>,
        #[arg(long)]
        template: Option<Id>,
        #[arg(long, value_parser = asset_status)]
        status: Option<AssetStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: Id,
    },
    Create {
        #[arg(long)]
        template: Id,
        #[arg(long)]
        classroom: Option<Id>,
        #[arg(long)]
        serial: Option<String>,
        #[arg(long, value_parser = asset_status, default_value = "active")]
        status: AssetStatus,
        /// YYYY-MM-DD
        #[arg(long)]
        purchase_date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    Update {
        id: Id,
        #[arg(long)]
        template: Option<Id>,
        #[arg(long)]
        classroom: Option<Id>,
        #[arg(long)]
        serial: Option<String>,
        #[arg(long, value_parser = asset_status)]
        status: Option<AssetStatus>,
        #[arg(long)]
        purchase_date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: Id,
    },
    /// Change status and/or classroom of several assets at once.
    BulkUpdate {
        #[arg(required = true)]
        ids: Vec<Id>,
        #[arg(long, value_parser = asset_status)]
        status: Option<AssetStatus>,
        #[arg(long)]
        classroom: Option<Id>,
    },
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<Id>,
    },
    /// Generate (or regenerate) the asset's QR code on the server.
    Qr {
        id: Id,
    },
    /// Upload a photo (PNG, JPEG, WebP or GIF).
    SetImage {
        id: Id,
        path: PathBuf,
    },
    /// Show the asset's history.
    Events {
        id: Id,
    },
    /// Write all matching assets to an Excel workbook.
    Export {
        #[arg(long, default_value = "assets.xlsx")]
        out: PathBuf,
        #[arg(long)]
        classroom: Option<Id>,
        #[arg(long, value_parser = asset_status)]
        status: Option<AssetStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Write the TSPL sticker markup for an asset (stdout by default).
    Sticker {
        id: Id,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print QR stickers on the configured label printer.
    Print {
        #[arg(required = true)]
        ids: Vec<Id>,
    },
}

#[derive(Debug, Subcommand)]
pub enum IncidentAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        asset: Option<Id>,
        #[arg(long, value_parser = incident_status)]
        status: Option<IncidentStatus>,
    },
    Show {
        id: Id,
    },
    Create {
        #[arg(long)]
        asset: Id,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = incident_priority, default_value = "medium")]
        priority: IncidentPriority,
    },
    Update {
        id: Id,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = incident_status)]
        status: Option<IncidentStatus>,
        #[arg(long, value_parser = incident_priority)]
        priority: Option<IncidentPriority>,
    },
    Resolve {
        id: Id,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: Id,
    },
    Update {
        id: Id,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long, value_parser = user_role)]
        role: Option<UserRole>,
        #[arg(long)]
        school: Option<Id>,
    },
    Activate {
        id: Id,
    },
    Deactivate {
        id: Id,
    },
    Delete {
        id: Id,
    },
}

#[derive(Debug, Subcommand)]
pub enum InvitationAction {
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    Create {
        email: String,
        #[arg(long, value_parser = user_role, default_value = "staff")]
        role: UserRole,
        #[arg(long)]
        school: Option<Id>,
    },
    Revoke {
        id: Id,
    },
    /// Accept an invitation and log in as the new account.
    Accept {
        token: String,
        #[arg(long)]
        full_name: Option<String>,
        /// Prompted for, without echo, when omitted.
        #[arg(long, env = "SCHOOLINV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportAction {
    /// Totals by status, category and school.
    Summary {
        /// Also save a JSON snapshot to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
