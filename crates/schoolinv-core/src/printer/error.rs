//! Errors surfaced by a print job.

/// Every print failure collapses into one of these; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("nothing to print: empty payload")]
    EmptyPayload,
    #[error("printer is busy with another job")]
    Busy,
    #[error("no printer found: {0}")]
    DeviceNotFound(String),
    #[error("printer not connected: {0}")]
    NotConnected(String),
    #[error("printer not configured: {0}")]
    NotConfigured(String),
    #[error("printer i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("bluetooth: {0}")]
    Bluetooth(String),
    #[error("bluetooth printing requires building with the `ble` feature")]
    BleUnavailable,
}

#[cfg(feature = "ble")]
impl From<btleplug::Error> for PrintError {
    fn from(e: btleplug::Error) -> Self {
        match &e {
            btleplug::Error::DeviceNotFound => PrintError::DeviceNotFound(e.to_string()),
            btleplug::Error::NotConnected => PrintError::NotConnected(e.to_string()),
            _ => PrintError::Bluetooth(e.to_string()),
        }
    }
}
