//! Raw TCP printers (port 9100 and the like).

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use super::{PrintError, PrinterLink};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct TcpLink {
    stream: TcpStream,
    peer: String,
}

impl TcpLink {
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, PrintError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| PrintError::DeviceNotFound(format!("{}: connect timed out", addr)))?
            .map_err(|e| PrintError::DeviceNotFound(format!("{}: {}", addr, e)))?;
        stream.set_nodelay(true)?;
        tracing::debug!(peer = %addr, "tcp printer connected");
        Ok(Self {
            stream,
            peer: addr.to_string(),
        })
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl PrinterLink for TcpLink {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), PrintError> {
        self.stream.write_all(frame).await?;
        self.stream.flush().await?;
        Ok(())
    }
}
