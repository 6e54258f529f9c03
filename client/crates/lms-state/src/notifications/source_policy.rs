use crate::NotificationSource;

use lms_core::{Identity, NotificationRecord, fallback_set};

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

/// Outcome of [`SourcePolicy::select`].
#[derive(Clone)]
pub enum SourceSelection {
    Fallback,
    Remote(Arc<dyn NotificationSource>),
}

/// The single place that decides between remote and fallback data.
#[derive(Clone, Default)]
pub struct SourcePolicy {
    remote: Option<Arc<dyn NotificationSource>>,
}

impl SourcePolicy {
    pub fn new(remote: Arc<dyn NotificationSource>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    /// Remote data disabled; every identity sees the fallback set.
    pub fn fallback_only() -> Self {
        Self::default()
    }

    pub fn select(&self, identity: Option<&Identity>) -> SourceSelection {
        match (identity, &self.remote) {
            (Some(_), Some(remote)) => SourceSelection::Remote(Arc::clone(remote)),
            _ => SourceSelection::Fallback,
        }
    }
}

/// Fetches from `source`, substituting the fallback set on any failure.
///
/// A 404 is logged at debug only; every other failure at warn. Never fails.
pub async fn resolve_with_fallback(source: &dyn NotificationSource) -> Vec<NotificationRecord> {
    match source.fetch().await {
        Ok(records) => unique_by_id(records),
        Err(e) if e.is_not_found() => {
            debug!("No notifications at {} source, using fallback", source.name());
            fallback_set()
        }
        Err(e) => {
            warn!(
                "Using fallback notifications, {} fetch failed: {e}",
                source.name()
            );
            fallback_set()
        }
    }
}

/// Keeps the first record for each id.
fn unique_by_id(records: Vec<NotificationRecord>) -> Vec<NotificationRecord> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<_> = records.into_iter().filter(|n| seen.insert(n.id)).collect();

    if unique.len() != total {
        warn!(
            "Dropped {} notifications with duplicate ids",
            total - unique.len()
        );
    }

    unique
}
