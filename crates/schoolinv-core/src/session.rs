//! Auth context: bearer token and current user, shared across CLI invocations.
//!
//! Stored as JSON at `~/.local/state/schoolinv/session.json` (mode 0600 on
//! Unix). A session only applies to the API it was created against.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::{ApiClient, ApiError};
use crate::config::SchoolinvConfig;
use crate::connectivity;
use crate::models::{AcceptInvitation, Credentials, RegisterUser, Timestamp, TokenResponse, User};

#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    pub api_base_url: String,
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: Timestamp,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api_base_url", &self.api_base_url)
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

fn same_api(a: &str, b: &str) -> bool {
    a.trim().trim_end_matches('/') == b.trim().trim_end_matches('/')
}

impl Session {
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::logging::state_dir()?.join("session.json"))
    }

    /// True when this session was issued by the API `cfg` points at.
    pub fn matches(&self, cfg: &SchoolinvConfig) -> bool {
        same_api(&self.api_base_url, &cfg.api_base_url)
    }

    /// Authenticated client using the config's timeouts and retry policy.
    pub fn client(&self, cfg: &SchoolinvConfig) -> Result<ApiClient, ApiError> {
        Ok(ApiClient::from_config(cfg)?.with_token(self.access_token.clone()))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_vec_pretty(self).context("serialize session")?;
        write_private(path, &json).with_context(|| format!("write session: {}", path.display()))?;
        Ok(())
    }

    /// Missing file → `Ok(None)`. A corrupt file is an error so it is not silently replaced.
    pub fn load_from_path(path: &Path) -> Result<Option<Session>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read session: {}", path.display())),
        };
        let session = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse session: {}", path.display()))?;
        Ok(Some(session))
    }

    /// Returns whether a session file existed.
    pub fn remove_at(path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("remove session: {}", path.display())),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    f.write_all(data)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, data)
}

/// Log in against the configured API and build a session (not yet saved).
pub async fn login(cfg: &SchoolinvConfig, credentials: &Credentials) -> Result<Session, ApiError> {
    let client = ApiClient::from_config(cfg)?;
    connectivity::check_online(client.base_url(), connectivity::DEFAULT_PROBE_TIMEOUT).await?;

    let token = client.login(credentials).await?;
    let session = from_token(cfg, client, token).await;
    tracing::info!(email = %credentials.email, "logged in");
    Ok(session)
}

/// Accept an invitation; the server answers with a token for the new account.
pub async fn accept_invitation(
    cfg: &SchoolinvConfig,
    token: &str,
    body: &AcceptInvitation,
) -> Result<Session, ApiError> {
    let client = ApiClient::from_config(cfg)?;
    let issued = client.accept_invitation(token, body).await?;
    let session = from_token(cfg, client, issued).await;
    tracing::info!("invitation accepted");
    Ok(session)
}

/// Session for a freshly issued token. A failed profile fetch leaves `user` unset.
async fn from_token(cfg: &SchoolinvConfig, client: ApiClient, token: TokenResponse) -> Session {
    let authed = client.with_token(token.access_token.clone());
    let user = match authed.me().await {
        Ok(u) => Some(u),
        Err(e) => {
            tracing::warn!("logged in but could not fetch profile: {}", e);
            None
        }
    };
    Session {
        api_base_url: cfg.api_base_url.clone(),
        access_token: token.access_token,
        user,
        created_at: Utc::now(),
    }
}

/// Register a new account; same offline pre-check as [`login`].
pub async fn register(cfg: &SchoolinvConfig, body: &RegisterUser) -> Result<User, ApiError> {
    let client = ApiClient::from_config(cfg)?;
    connectivity::check_online(client.base_url(), connectivity::DEFAULT_PROBE_TIMEOUT).await?;
    client.register(body).await
}
