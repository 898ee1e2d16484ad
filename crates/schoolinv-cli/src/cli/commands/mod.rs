//! CLI command handlers, one file per resource.

mod assets;
mod auth;
mod catalog;
mod completions;
mod incidents;
mod reports;
mod schools;
mod users;

pub use assets::run_assets;
pub use auth::{run_login, run_logout, run_register, run_whoami};
pub use catalog::{run_categories, run_templates};
pub use completions::{run_completions, run_manpage};
pub use incidents::run_incidents;
pub use reports::run_reports;
pub use schools::{run_classrooms, run_schools};
pub use users::{run_invitations, run_users};

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use schoolinv_core::api::ApiClient;
use schoolinv_core::config::SchoolinvConfig;
use schoolinv_core::models::Page;
use schoolinv_core::session::Session;

/// Config plus the location of the stored session.
pub struct Ctx {
    pub cfg: SchoolinvConfig,
    pub session_path: PathBuf,
}

impl Ctx {
    pub fn new(cfg: SchoolinvConfig) -> Result<Self> {
        Ok(Self {
            cfg,
            session_path: Session::default_path()?,
        })
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Session::load_from_path(&self.session_path)
    }

    /// Authenticated client for the configured API.
    pub fn client(&self) -> Result<ApiClient> {
        let Some(session) = self.session()? else {
            bail!("not logged in; run `schoolinv login <email>` first");
        };
        if !session.matches(&self.cfg) {
            bail!(
                "stored session is for {}, not {}; log in again",
                session.api_base_url,
                self.cfg.api_base_url
            );
        }
        Ok(session.client(&self.cfg)?)
    }
}

/// Use `given` or prompt on the terminal.
pub(crate) fn password_or_prompt(given: Option<String>) -> Result<String> {
    if let Some(p) = given {
        return Ok(p);
    }
    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    {
        let echo = EchoOff::stdin();
        tracing::trace!(echo_off = echo.is_active(), "reading password");
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read password")?;
    }
    eprintln!();
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("empty password");
    }
    Ok(password)
}

/// Terminal echo disabled on stdin until dropped; a no-op when stdin is not a tty.
#[cfg(unix)]
struct EchoOff {
    saved: Option<libc::termios>,
}

#[cfg(unix)]
impl EchoOff {
    fn stdin() -> Self {
        let fd = libc::STDIN_FILENO;
        if unsafe { libc::isatty(fd) } != 1 {
            return Self { saved: None };
        }
        let mut term: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut term) } != 0 {
            return Self { saved: None };
        }
        let saved = term;
        term.c_lflag &= !libc::ECHO;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &term) } != 0 {
            tracing::debug!("could not disable terminal echo");
            return Self { saved: None };
        }
        Self { saved: Some(saved) }
    }

    fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

#[cfg(unix)]
impl Drop for EchoOff {
    fn drop(&mut self) {
        if let Some(saved) = &self.saved {
            unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved) };
        }
    }
}

#[cfg(not(unix))]
struct EchoOff;

#[cfg(not(unix))]
impl EchoOff {
    fn stdin() -> Self {
        EchoOff
    }

    fn is_active(&self) -> bool {
        false
    }
}

pub(crate) fn or_dash(v: Option<&str>) -> &str {
    v.filter(|s| !s.is_empty()).unwrap_or("-")
}

pub(crate) fn print_page_footer<T>(page: &Page<T>) {
    println!(
        "page {}/{} ({} total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}

/// Pretty JSON of a single record for `show` commands.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_password_skips_prompt() {
        assert_eq!(password_or_prompt(Some("s3cret".into())).unwrap(), "s3cret");
    }

    #[test]
    fn echo_guard_can_be_taken_again_after_drop() {
        let first = EchoOff::stdin();
        let was_active = first.is_active();
        drop(first);
        let second = EchoOff::stdin();
        assert_eq!(second.is_active(), was_active);
    }
}
