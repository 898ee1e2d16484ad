//! Bluetooth LE label printers reached through one writable GATT characteristic.

use std::time::Duration;

use btleplug::api::{Central, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType};
use btleplug::platform::{Manager, Peripheral};
use uuid::Uuid;

use super::{PrintError, PrinterLink};
use crate::config::PrinterConfig;

pub struct BleLink {
    peripheral: Peripheral,
    characteristic: Characteristic,
    name: Option<String>,
}

impl std::fmt::Debug for BleLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BleLink")
            .field("name", &self.name)
            .field("characteristic", &self.characteristic.uuid)
            .finish()
    }
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, PrintError> {
    Uuid::parse_str(value.trim())
        .map_err(|e| PrintError::NotConfigured(format!("{} {:?}: {}", field, value, e)))
}

fn name_matches(name: Option<&str>, prefix: Option<&str>) -> bool {
    match prefix {
        None => true,
        Some(p) => name.is_some_and(|n| n.starts_with(p)),
    }
}

impl BleLink {
    /// Scan for a printer advertising the configured service, connect and
    /// locate the write characteristic.
    pub async fn discover(cfg: &PrinterConfig) -> Result<Self, PrintError> {
        let service = parse_uuid("ble_service_uuid", &cfg.ble_service_uuid)?;
        let char_uuid = parse_uuid("ble_characteristic_uuid", &cfg.ble_characteristic_uuid)?;

        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PrintError::DeviceNotFound("no bluetooth adapter".into()))?;

        adapter
            .start_scan(ScanFilter {
                services: vec![service],
            })
            .await?;
        tokio::time::sleep(Duration::from_secs(cfg.ble_scan_secs)).await;
        let peripherals = adapter.peripherals().await?;
        if let Err(e) = adapter.stop_scan().await {
            tracing::debug!("stop_scan failed: {}", e);
        }

        let mut found = None;
        for p in peripherals {
            let Some(props) = p.properties().await? else {
                continue;
            };
            // Some backends ignore the scan filter.
            if !props.services.is_empty() && !props.services.contains(&service) {
                continue;
            }
            if !name_matches(props.local_name.as_deref(), cfg.ble_name_prefix.as_deref()) {
                continue;
            }
            found = Some((p, props.local_name));
            break;
        }
        let (peripheral, name) = found.ok_or_else(|| {
            PrintError::DeviceNotFound(format!("no device advertising service {}", service))
        })?;

        if !peripheral.is_connected().await? {
            peripheral.connect().await?;
        }
        peripheral.discover_services().await?;
        let characteristic = peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == char_uuid && c.service_uuid == service)
            .ok_or_else(|| {
                PrintError::NotConnected(format!(
                    "device has no characteristic {} in service {}",
                    char_uuid, service
                ))
            })?;

        tracing::info!(name = ?name, "bluetooth printer connected");
        Ok(Self {
            peripheral,
            characteristic,
            name,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PrinterLink for BleLink {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), PrintError> {
        self.peripheral
            .write(&self.characteristic, frame, WriteType::WithResponse)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefix_filter() {
        assert!(name_matches(Some("PT-210"), None));
        assert!(name_matches(None, None));
        assert!(name_matches(Some("PT-210_ABCD"), Some("PT-")));
        assert!(!name_matches(Some("Headphones"), Some("PT-")));
        assert!(!name_matches(None, Some("PT-")));
    }

    #[test]
    fn bad_uuid_is_a_config_error() {
        assert!(matches!(
            parse_uuid("ble_service_uuid", "nope"),
            Err(PrintError::NotConfigured(_))
        ));
        assert!(parse_uuid("x", crate::config::DEFAULT_BLE_SERVICE).is_ok());
    }
}
