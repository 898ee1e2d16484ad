//! `config.toml` loading, defaults and per-section accessors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::printer::Pacing;
use crate::retry::RetryPolicy;

/// Environment variable that overrides `api_base_url` from the config file.
pub const API_URL_ENV: &str = "SCHOOLINV_API_URL";

/// Default GATT service exposed by TSPL label printers over BLE.
pub const DEFAULT_BLE_SERVICE: &str = "000018f0-0000-1000-8000-00805f9b34fb";
/// Default writable characteristic inside [`DEFAULT_BLE_SERVICE`].
pub const DEFAULT_BLE_CHARACTERISTIC: &str = "00002af1-0000-1000-8000-00805f9b34fb";

/// Retry policy parameters for idempotent GET requests (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 5,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// How the label printer is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterTransport {
    /// Bluetooth LE GATT characteristic (requires the `ble` feature).
    #[default]
    Ble,
    /// Raw TCP socket (port 9100 style network printers).
    Tcp,
}

/// Label printer settings (optional `[printer]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    #[serde(default)]
    pub transport: PrinterTransport,
    /// `host:port` for the TCP transport.
    #[serde(default)]
    pub tcp_addr: Option<String>,
    #[serde(default = "default_ble_service")]
    pub ble_service_uuid: String,
    #[serde(default = "default_ble_characteristic")]
    pub ble_characteristic_uuid: String,
    /// Only pair with devices whose advertised name starts with this.
    #[serde(default)]
    pub ble_name_prefix: Option<String>,
    #[serde(default = "default_ble_scan_secs")]
    pub ble_scan_secs: u64,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    #[serde(default = "default_final_delay_ms")]
    pub final_delay_ms: u64,
}

fn default_ble_service() -> String {
    DEFAULT_BLE_SERVICE.to_string()
}

fn default_ble_characteristic() -> String {
    DEFAULT_BLE_CHARACTERISTIC.to_string()
}

fn default_ble_scan_secs() -> u64 {
    5
}

fn default_chunk_size() -> usize {
    512
}

fn default_frame_delay_ms() -> u64 {
    100
}

fn default_final_delay_ms() -> u64 {
    500
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            transport: PrinterTransport::default(),
            tcp_addr: None,
            ble_service_uuid: default_ble_service(),
            ble_characteristic_uuid: default_ble_characteristic(),
            ble_name_prefix: None,
            ble_scan_secs: default_ble_scan_secs(),
            chunk_size: default_chunk_size(),
            frame_delay_ms: default_frame_delay_ms(),
            final_delay_ms: default_final_delay_ms(),
        }
    }
}

impl PrinterConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            chunk_size: self.chunk_size.max(1),
            frame_delay: Duration::from_millis(self.frame_delay_ms),
            final_delay: Duration::from_millis(self.final_delay_ms),
        }
    }
}

/// Global configuration loaded from `~/.config/schoolinv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolinvConfig {
    /// Base URL of the inventory REST API (e.g. `https://inventory.example.org/api`).
    pub api_base_url: String,
    /// Base URL of the web app; QR stickers deep-link to `{app_base_url}/assets/{id}`.
    pub app_base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Largest photo accepted by `assets set-image`, in bytes.
    #[serde(default)]
    pub max_image_bytes: Option<u64>,
    /// Optional retry policy for GETs; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    #[serde(default)]
    pub printer: Option<PrinterConfig>,
}

impl Default for SchoolinvConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            app_base_url: "http://127.0.0.1:3000".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_image_bytes: None,
            retry: None,
            printer: None,
        }
    }
}

impl SchoolinvConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    pub fn printer(&self) -> PrinterConfig {
        self.printer.clone().unwrap_or_default()
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.max_image_bytes
            .unwrap_or(crate::photo::DEFAULT_MAX_IMAGE_BYTES)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Apply environment overrides (currently only [`API_URL_ENV`]).
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("schoolinv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SchoolinvConfig> {
    let path = config_path()?;
    Ok(load_or_init_at(&path)?.apply_env())
}

/// Like [`load_or_init`] but at an explicit path and without env overrides.
pub fn load_or_init_at(path: &Path) -> Result<SchoolinvConfig> {
    if !path.exists() {
        let default_cfg = SchoolinvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SchoolinvConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
