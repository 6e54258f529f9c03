use lms_core::{NotificationRecord, fallback_set};

/// Which records a read-mark applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadReceipt {
    One(u64),
    All,
}

/// Snapshot published to notification consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeed {
    pub records: Vec<NotificationRecord>,
    /// A remote fetch is in flight; `records` still shows the previous list.
    pub loading: bool,
    /// Bumped on every identity transition. Fetches started under an older
    /// generation are discarded when they complete.
    pub generation: u64,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self {
            records: fallback_set(),
            loading: false,
            generation: 0,
        }
    }
}

impl NotificationFeed {
    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|n| n.is_unread()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&NotificationRecord> {
        self.records.iter().find(|n| n.id == id)
    }

    /// Flips read flags locally. Returns whether anything changed.
    pub fn apply_receipt(&mut self, receipt: ReadReceipt) -> bool {
        let mut changed = false;

        for record in &mut self.records {
            let matches = match receipt {
                ReadReceipt::One(id) => record.id == id,
                ReadReceipt::All => true,
            };

            if matches && record.is_unread() {
                record.mark_read();
                changed = true;
            }
        }

        changed
    }
}
