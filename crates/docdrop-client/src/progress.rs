//! Byte-level progress reporting for an in-flight submission.

use bytes::Bytes;
use docdrop_core::models::Progress;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with each progress observation. Observations are
/// monotonically non-decreasing: the shared byte counter only grows.
pub type ProgressObserver = Arc<dyn Fn(Progress) + Send + Sync>;

/// Shared byte counter across every part stream of one submission.
pub(crate) struct ProgressTracker {
    sent: Arc<AtomicU64>,
    total: Option<u64>,
    observer: ProgressObserver,
}

impl ProgressTracker {
    pub(crate) fn new(total: Option<u64>, observer: ProgressObserver) -> Self {
        Self {
            sent: Arc::new(AtomicU64::new(0)),
            total,
            observer,
        }
    }

    /// Emit the initial observation so the consumer sees a state even before
    /// the first chunk moves (0.0, or indeterminate when total is unknown).
    pub(crate) fn observe_start(&self) {
        (self.observer)(Self::progress_for(0, self.total));
    }

    /// Wrap a part body so each transferred chunk advances the shared
    /// counter and notifies the observer.
    pub(crate) fn count(
        &self,
        stream: BoxStream<'static, std::io::Result<Bytes>>,
    ) -> BoxStream<'static, std::io::Result<Bytes>> {
        let sent = Arc::clone(&self.sent);
        let total = self.total;
        let observer = Arc::clone(&self.observer);

        stream
            .inspect(move |item| {
                if let Ok(chunk) = item {
                    let so_far =
                        sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
                    observer(Self::progress_for(so_far, total));
                }
            })
            .boxed()
    }

    fn progress_for(sent: u64, total: Option<u64>) -> Progress {
        match total {
            Some(total) if total > 0 => {
                Progress::Fraction((sent as f64 / total as f64).min(1.0))
            }
            _ => Progress::Indeterminate { bytes_sent: sent },
        }
    }
}
