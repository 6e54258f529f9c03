use crate::{NotificationFeed, NotificationSource, ReadReceipt};

use std::sync::Arc;

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A remote source plus the runtime its calls run on.
#[derive(Clone)]
pub struct RemoteSync {
    source: Arc<dyn NotificationSource>,
    runtime: Handle,
}

impl RemoteSync {
    pub fn new(source: Arc<dyn NotificationSource>, runtime: Handle) -> Self {
        Self { source, runtime }
    }

    /// Sends the receipt to the source on a detached task. Failures are
    /// logged; dropping the handle does not cancel the call.
    pub fn spawn(&self, receipt: ReadReceipt) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);

        self.runtime.spawn(async move {
            let result = match receipt {
                ReadReceipt::One(id) => source.mark_read(id).await,
                ReadReceipt::All => source.mark_all_read().await,
            };

            match result {
                Ok(()) => debug!("Synced {receipt:?} to {} source", source.name()),
                Err(e) => warn!("Could not sync {receipt:?} to {}: {e}", source.name()),
            }
        })
    }
}

/// How read-marks reach the local feed and the server.
///
/// Swapping the policy changes consistency behavior without touching the
/// manager or its consumers.
pub trait ReadPolicy: Send + Sync + 'static {
    /// `remote` is `None` when the feed is showing fallback data.
    fn apply(
        &self,
        feed: &watch::Sender<NotificationFeed>,
        remote: Option<&RemoteSync>,
        receipt: ReadReceipt,
    ) -> Option<JoinHandle<()>>;
}

/// Flip the flag locally first, then tell the server best-effort.
/// A remote failure never rolls the local flag back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimisticReads;

impl ReadPolicy for OptimisticReads {
    fn apply(
        &self,
        feed: &watch::Sender<NotificationFeed>,
        remote: Option<&RemoteSync>,
        receipt: ReadReceipt,
    ) -> Option<JoinHandle<()>> {
        let changed = feed.send_if_modified(|feed| feed.apply_receipt(receipt));

        if !changed {
            debug!("{receipt:?} changed nothing locally");
            return None;
        }

        remote.map(|remote| remote.spawn(receipt))
    }
}
