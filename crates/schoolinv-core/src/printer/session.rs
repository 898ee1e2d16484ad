//! A printer connection shared by every job in one session.

use tokio::sync::Mutex;

use super::{send_chunked, Pacing, PrintError, PrintReport, PrinterConnector};

/// Connects on the first job and keeps the link for the following ones.
///
/// Only one job runs at a time: a job submitted while another is still
/// writing fails with [`PrintError::Busy`] instead of interleaving frames.
/// A link whose write failed is dropped, so the next job reconnects.
pub struct PrinterSession<C: PrinterConnector> {
    connector: C,
    pacing: Pacing,
    link: Mutex<Option<C::Link>>,
}

impl<C: PrinterConnector> PrinterSession<C> {
    pub fn new(connector: C, pacing: Pacing) -> Self {
        Self {
            connector,
            pacing,
            link: Mutex::new(None),
        }
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// `false` while a job is running or before the first connect.
    pub fn is_connected(&self) -> bool {
        self.link.try_lock().map(|l| l.is_some()).unwrap_or(false)
    }

    pub async fn print(&self, commands: &str) -> Result<PrintReport, PrintError> {
        let mut slot = self.link.try_lock().map_err(|_| PrintError::Busy)?;
        if commands.is_empty() {
            return Err(PrintError::EmptyPayload);
        }

        let mut link = match slot.take() {
            Some(link) => link,
            None => {
                tracing::debug!("connecting to printer");
                self.connector.connect().await?
            }
        };

        match send_chunked(&mut link, commands.as_bytes(), &self.pacing).await {
            Ok(report) => {
                tracing::info!(bytes = report.bytes, frames = report.frames, "print job sent");
                *slot = Some(link);
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("print job failed, dropping printer link: {}", e);
                Err(e)
            }
        }
    }

    /// Drop the cached link. Fails with `Busy` while a job is running.
    pub fn disconnect(&self) -> Result<(), PrintError> {
        let mut slot = self.link.try_lock().map_err(|_| PrintError::Busy)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testing::RecordingConnector;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn connects_once_and_reuses_link() {
        let session = PrinterSession::new(RecordingConnector::default(), Pacing::default());
        assert!(!session.is_connected());

        session.print("SIZE 50 mm,25 mm\r\nPRINT 1\r\n").await.unwrap();
        session.print("CLS\r\nPRINT 1\r\n").await.unwrap();

        let recorded = &session.connector.recorded;
        assert_eq!(recorded.connects(), 1);
        assert_eq!(recorded.frames().len(), 2);
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn empty_job_does_not_connect() {
        let session = PrinterSession::new(RecordingConnector::default(), Pacing::default());
        let err = session.print("").await.unwrap_err();
        assert!(matches!(err, PrintError::EmptyPayload));
        assert_eq!(session.connector.recorded.connects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_drops_link_and_next_job_reconnects() {
        let connector = RecordingConnector::default();
        *connector.fail_first_write.lock().unwrap() = true;
        let session = PrinterSession::new(connector, Pacing::default());

        assert!(session.print("PRINT 1\r\n").await.is_err());
        assert!(!session.is_connected());

        session.print("PRINT 1\r\n").await.unwrap();
        assert_eq!(session.connector.recorded.connects(), 2);
        assert_eq!(session.connector.recorded.frames().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_job_is_rejected_as_busy() {
        let connector = RecordingConnector {
            write_time: Duration::from_millis(50),
            ..Default::default()
        };
        let session = Arc::new(PrinterSession::new(connector, Pacing::default()));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.print(&"x".repeat(1500)).await })
        };
        tokio::task::yield_now().await;

        let err = session.print("PRINT 1\r\n").await.unwrap_err();
        assert!(matches!(err, PrintError::Busy));
        assert!(session.disconnect().is_err());

        let report = first.await.unwrap().unwrap();
        assert_eq!(report.frames, 3);
        assert_eq!(session.connector.recorded.frames().concat(), "x".repeat(1500).into_bytes());
    }

    #[tokio::test]
    async fn disconnect_clears_cached_link() {
        let session = PrinterSession::new(
            RecordingConnector::default(),
            Pacing {
                chunk_size: 512,
                frame_delay: Duration::ZERO,
                final_delay: Duration::ZERO,
            },
        );
        session.print("PRINT 1\r\n").await.unwrap();
        session.disconnect().unwrap();
        assert!(!session.is_connected());
        session.print("PRINT 1\r\n").await.unwrap();
        assert_eq!(session.connector.recorded.connects(), 2);
    }
}
