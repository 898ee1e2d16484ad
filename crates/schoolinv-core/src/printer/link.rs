//! Printer link chosen from configuration.

use super::tcp::{TcpLink, DEFAULT_CONNECT_TIMEOUT};
use super::{PrintError, PrinterConnector, PrinterLink};
use crate::config::{PrinterConfig, PrinterTransport};

#[cfg(feature = "ble")]
use super::ble::BleLink;

#[derive(Debug)]
pub enum AnyLink {
    Tcp(TcpLink),
    #[cfg(feature = "ble")]
    Ble(BleLink),
}

impl PrinterLink for AnyLink {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), PrintError> {
        match self {
            AnyLink::Tcp(link) => link.write_frame(frame).await,
            #[cfg(feature = "ble")]
            AnyLink::Ble(link) => link.write_frame(frame).await,
        }
    }
}

impl PrinterConnector for PrinterConfig {
    type Link = AnyLink;

    async fn connect(&self) -> Result<AnyLink, PrintError> {
        match self.transport {
            PrinterTransport::Tcp => {
                let addr = self
                    .tcp_addr
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| {
                        PrintError::NotConfigured("printer.tcp_addr is not set".into())
                    })?;
                Ok(AnyLink::Tcp(TcpLink::connect(addr, DEFAULT_CONNECT_TIMEOUT).await?))
            }
            #[cfg(feature = "ble")]
            PrinterTransport::Ble => Ok(AnyLink::Ble(BleLink::discover(self).await?)),
            #[cfg(not(feature = "ble"))]
            PrinterTransport::Ble => Err(PrintError::BleUnavailable),
        }
    }
}
