//! Delivery of TSPL jobs to a label printer.
//!
//! A job is split into fixed-size frames written one after another over a
//! [`PrinterLink`]. Printers with small receive buffers drop data when frames
//! arrive back to back, so every frame is followed by a pause and the last
//! one by a longer pause before the link is considered idle.

mod error;
mod link;
mod session;
mod tcp;

#[cfg(feature = "ble")]
mod ble;

pub use error::PrintError;
pub use link::AnyLink;
pub use session::PrinterSession;
pub use tcp::TcpLink;

#[cfg(feature = "ble")]
pub use ble::BleLink;

use std::future::Future;
use std::time::Duration;

/// A connected printer that accepts raw bytes.
pub trait PrinterLink: Send {
    /// Write one frame and wait until the transport acknowledges it.
    fn write_frame(&mut self, frame: &[u8]) -> impl Future<Output = Result<(), PrintError>> + Send;
}

/// Opens a [`PrinterLink`]; [`PrinterSession`] calls it at most once per cached link.
pub trait PrinterConnector: Send + Sync {
    type Link: PrinterLink;

    fn connect(&self) -> impl Future<Output = Result<Self::Link, PrintError>> + Send;
}

/// Frame size and inter-frame delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub chunk_size: usize,
    pub frame_delay: Duration,
    pub final_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            frame_delay: Duration::from_millis(100),
            final_delay: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// Number of writes needed for `len` bytes.
    pub fn frame_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size.max(1))
    }

    /// Time spent pausing for a job of `frames` frames.
    pub fn total_delay(&self, frames: usize) -> Duration {
        if frames == 0 {
            return Duration::ZERO;
        }
        self.frame_delay * (frames as u32 - 1) + self.final_delay
    }
}

/// What a finished job sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintReport {
    pub bytes: usize,
    pub frames: usize,
}

/// Write `payload` to `link` in `pacing.chunk_size` frames.
///
/// Stops at the first failed write; frames already sent are not recalled.
pub async fn send_chunked<L>(
    link: &mut L,
    payload: &[u8],
    pacing: &Pacing,
) -> Result<PrintReport, PrintError>
where
    L: PrinterLink,
{
    if payload.is_empty() {
        return Err(PrintError::EmptyPayload);
    }
    let frames = pacing.frame_count(payload.len());
    for (i, frame) in payload.chunks(pacing.chunk_size.max(1)).enumerate() {
        link.write_frame(frame).await?;
        tracing::trace!(frame = i + 1, of = frames, bytes = frame.len(), "frame written");
        let pause = if i + 1 == frames {
            pacing.final_delay
        } else {
            pacing.frame_delay
        };
        tokio::time::sleep(pause).await;
    }
    Ok(PrintReport {
        bytes: payload.len(),
        frames,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// Frames seen by every link from one [`RecordingConnector`].
    #[derive(Debug, Default)]
    pub struct Recorded {
        pub frames: Mutex<Vec<(Instant, Vec<u8>)>>,
        pub connects: AtomicUsize,
    }

    impl Recorded {
        pub fn frames(&self) -> Vec<Vec<u8>> {
            self.frames
                .lock()
                .unwrap()
                .iter()
                .map(|(_, f)| f.clone())
                .collect()
        }

        pub fn connects(&self) -> usize {
            self.connects.load(Ordering::SeqCst)
        }
    }

    pub struct RecordingLink {
        pub recorded: Arc<Recorded>,
        /// Fail the write with this zero-based index.
        pub fail_at: Option<usize>,
        /// Simulated time each write takes.
        pub write_time: Duration,
        writes: usize,
    }

    impl RecordingLink {
        pub fn new(recorded: Arc<Recorded>) -> Self {
            Self {
                recorded,
                fail_at: None,
                write_time: Duration::ZERO,
                writes: 0,
            }
        }
    }

    impl PrinterLink for RecordingLink {
        async fn write_frame(&mut self, frame: &[u8]) -> Result<(), PrintError> {
            let index = self.writes;
            self.writes += 1;
            if !self.write_time.is_zero() {
                tokio::time::sleep(self.write_time).await;
            }
            if self.fail_at == Some(index) {
                return Err(PrintError::NotConnected("link dropped".into()));
            }
            self.recorded
                .frames
                .lock()
                .unwrap()
                .push((Instant::now(), frame.to_vec()));
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingConnector {
        pub recorded: Arc<Recorded>,
        pub fail_first_write: Mutex<bool>,
        pub write_time: Duration,
    }

    impl PrinterConnector for RecordingConnector {
        type Link = RecordingLink;

        async fn connect(&self) -> Result<RecordingLink, PrintError> {
            self.recorded.connects.fetch_add(1, Ordering::SeqCst);
            let mut link = RecordingLink::new(Arc::clone(&self.recorded));
            link.write_time = self.write_time;
            let mut fail = self.fail_first_write.lock().unwrap();
            if *fail {
                link.fail_at = Some(0);
                *fail = false;
            }
            Ok(link)
        }
    }
}
