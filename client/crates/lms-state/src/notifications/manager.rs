use crate::{
    IdentityTransition, NotificationFeed, NotificationSource, OptimisticReads, ReadPolicy,
    ReadReceipt, RemoteSync, SourcePolicy, SourceSelection, StateError, StateResult,
    resolve_with_fallback,
};

use lms_core::{Identity, NotificationRecord, fallback_set};

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the notification list for the current identity.
///
/// The list is rebuilt on every identity transition and never persisted.
/// Cheap to clone; clones share the same feed.
pub struct NotificationManager<R: ReadPolicy = OptimisticReads> {
    inner: Arc<Inner<R>>,
}

impl<R: ReadPolicy> Clone for NotificationManager<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<R> {
    feed_tx: watch::Sender<NotificationFeed>,
    sources: SourcePolicy,
    reads: R,
    runtime: Handle,
    /// Remote source for read-marks; `None` while showing fallback data.
    remote: Mutex<Option<RemoteSync>>,
}

impl NotificationManager<OptimisticReads> {
    /// Must be called from within a Tokio runtime.
    pub fn new(sources: SourcePolicy) -> StateResult<Self> {
        Self::with_read_policy(sources, OptimisticReads)
    }
}

impl<R: ReadPolicy> NotificationManager<R> {
    pub fn with_read_policy(sources: SourcePolicy, reads: R) -> StateResult<Self> {
        let runtime = Handle::try_current().map_err(|e| StateError::runtime(e.to_string()))?;
        let (feed_tx, _) = watch::channel(NotificationFeed::default());

        Ok(Self {
            inner: Arc::new(Inner {
                feed_tx,
                sources,
                reads,
                runtime,
                remote: Mutex::new(None),
            }),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationFeed> {
        self.inner.feed_tx.subscribe()
    }

    pub fn feed(&self) -> NotificationFeed {
        self.inner.feed_tx.borrow().clone()
    }

    pub fn notifications(&self) -> Vec<NotificationRecord> {
        self.inner.feed_tx.borrow().records.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.inner.feed_tx.borrow().unread_count()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.feed_tx.borrow().loading
    }

    /// Rebuilds the feed for `identity`.
    ///
    /// Signed out: the fallback set, synchronously. Signed in: the current
    /// list stays visible (the fallback set if it was cleared) while a fetch
    /// runs; the returned task applies its result only if no newer
    /// transition happened in the meantime.
    pub fn on_identity_changed(&self, identity: Option<&Identity>) -> Option<JoinHandle<()>> {
        match self.inner.sources.select(identity) {
            SourceSelection::Fallback => {
                *lock(&self.inner.remote) = None;
                self.inner.feed_tx.send_modify(|feed| {
                    feed.generation += 1;
                    feed.records = fallback_set();
                    feed.loading = false;
                });
                debug!("Notifications reset to fallback set");
                None
            }
            SourceSelection::Remote(source) => {
                *lock(&self.inner.remote) =
                    Some(RemoteSync::new(Arc::clone(&source), self.inner.runtime.clone()));

                let mut generation = 0;
                self.inner.feed_tx.send_modify(|feed| {
                    feed.generation += 1;
                    generation = feed.generation;
                    if feed.records.is_empty() {
                        feed.records = fallback_set();
                    }
                    feed.loading = true;
                });

                Some(self.spawn_fetch(source, generation))
            }
        }
    }

    /// Follows a session store's identity transitions: every change of
    /// acting user rebuilds the feed, including a sign-out and sign-in that
    /// land on the same user. Profile edits do not.
    pub fn watch_session(
        &self,
        mut transitions: watch::Receiver<IdentityTransition>,
    ) -> JoinHandle<()> {
        let manager = self.clone();

        self.inner.runtime.spawn(async move {
            let mut last_epoch = 0;

            loop {
                let transition = transitions.borrow_and_update().clone();

                if transition.is_loaded() && transition.epoch != last_epoch {
                    manager.on_identity_changed(transition.identity.as_ref());
                    last_epoch = transition.epoch;
                }

                if transitions.changed().await.is_err() {
                    debug!("Session store dropped, notification watcher exiting");
                    break;
                }
            }
        })
    }

    /// Marks one record read. Idempotent.
    pub fn mark_as_read(&self, id: u64) -> Option<JoinHandle<()>> {
        self.apply_receipt(ReadReceipt::One(id))
    }

    pub fn mark_all_as_read(&self) -> Option<JoinHandle<()>> {
        self.apply_receipt(ReadReceipt::All)
    }

    /// Empties the local list. Never reaches the server.
    pub fn clear_all(&self) {
        let cleared = self.inner.feed_tx.send_if_modified(|feed| {
            if feed.records.is_empty() {
                return false;
            }
            feed.records.clear();
            true
        });

        if cleared {
            info!("Cleared notifications");
        }
    }

    fn apply_receipt(&self, receipt: ReadReceipt) -> Option<JoinHandle<()>> {
        let remote = lock(&self.inner.remote).clone();
        self.inner
            .reads
            .apply(&self.inner.feed_tx, remote.as_ref(), receipt)
    }

    fn spawn_fetch(&self, source: Arc<dyn NotificationSource>, generation: u64) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);

        self.inner.runtime.spawn(async move {
            let records = resolve_with_fallback(source.as_ref()).await;

            let applied = inner.feed_tx.send_if_modified(|feed| {
                if feed.generation != generation {
                    return false;
                }
                feed.records = records;
                feed.loading = false;
                true
            });

            if applied {
                debug!("Applied {} notifications (generation {generation})", source.name());
            } else {
                debug!("Discarded stale notification fetch (generation {generation})");
            }
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
