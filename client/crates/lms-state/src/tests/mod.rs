
use crate::{NotificationSource, ReadReceipt};

use lms_core::{Identity, NotificationCategory, NotificationRecord, Role};
use lms_gateway::{GatewayError, GatewayResult};
use lms_store::{KeyValueStore, MemoryStore, StoreResult};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

pub(crate) fn student() -> Identity {
    Identity::new("1", "John Doe", "john.doe@edapp.com", Role::Student)
}

pub(crate) fn instructor() -> Identity {
    Identity::new("2", "Security Experts", "instructor@edapp.com", Role::Instructor)
}

pub(crate) fn record(id: u64, title: &str) -> NotificationRecord {
    NotificationRecord {
        id,
        category: NotificationCategory::System,
        title: title.to_string(),
        message: format!("{title} body"),
        time: "just now".to_string(),
        read: false,
        icon: "🔔".to_string(),
    }
}

/// One canned answer to a fetch.
pub(crate) struct Script {
    pub(crate) result: Result<Vec<NotificationRecord>, StatusCode>,
    /// Fetch blocks until this is notified.
    pub(crate) gate: Option<Arc<Notify>>,
}

impl Script {
    pub(crate) fn ok(records: Vec<NotificationRecord>) -> Self {
        Self {
            result: Ok(records),
            gate: None,
        }
    }

    pub(crate) fn fail(status: StatusCode) -> Self {
        Self {
            result: Err(status),
            gate: None,
        }
    }

    pub(crate) fn gated(mut self, gate: &Arc<Notify>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }
}

/// Source answering fetches from a queue and recording read-marks.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    scripts: Mutex<VecDeque<Script>>,
    marks: Mutex<Vec<ReadReceipt>>,
    mark_failure: Option<StatusCode>,
    /// Notified whenever a fetch begins.
    pub(crate) started: Notify,
}

impl ScriptedSource {
    pub(crate) fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            ..Default::default()
        }
    }

    pub(crate) fn failing_marks(mut self, status: StatusCode) -> Self {
        self.mark_failure = Some(status);
        self
    }

    pub(crate) fn marks(&self) -> Vec<ReadReceipt> {
        self.marks.lock().unwrap().clone()
    }

    fn record_mark(&self, receipt: ReadReceipt) -> GatewayResult<()> {
        self.marks.lock().unwrap().push(receipt);
        match self.mark_failure {
            Some(status) => Err(GatewayError::request_failed(status, "mark failed")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NotificationSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self) -> GatewayResult<Vec<NotificationRecord>> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Script::ok(Vec::new()));
        self.started.notify_one();

        if let Some(gate) = script.gate {
            gate.notified().await;
        }

        script
            .result
            .map_err(|status| GatewayError::request_failed(status, "scripted failure"))
    }

    async fn mark_read(&self, id: u64) -> GatewayResult<()> {
        self.record_mark(ReadReceipt::One(id))
    }

    async fn mark_all_read(&self) -> GatewayResult<()> {
        self.record_mark(ReadReceipt::All)
    }
}

type Snapshot = Box<dyn Fn() -> String + Send + Sync>;

/// Memory store that captures a snapshot of some published state on every
/// write, to check what subscribers can see while storage is busy.
#[derive(Default)]
pub(crate) struct ObservingStore {
    inner: MemoryStore,
    snapshot: Mutex<Option<Snapshot>>,
    seen: Mutex<Vec<String>>,
}

impl ObservingStore {
    pub(crate) fn observe(&self, snapshot: impl Fn() -> String + Send + Sync + 'static) {
        *self.snapshot.lock().unwrap() = Some(Box::new(snapshot));
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl KeyValueStore for ObservingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(snapshot) = self.snapshot.lock().unwrap().as_ref() {
            self.seen.lock().unwrap().push(snapshot());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// Runs `work` on its own thread; false if it did not finish in time.
pub(crate) fn finishes_in_time(work: impl FnOnce() + Send + 'static) -> bool {
    let (done_tx, done_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        work();
        let _ = done_tx.send(());
    });
    done_rx
        .recv_timeout(std::time::Duration::from_secs(2))
        .is_ok()
}
