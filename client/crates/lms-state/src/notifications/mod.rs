mod feed;
mod manager;
mod read_policy;
mod source;
mod source_policy;

pub use feed::{NotificationFeed, ReadReceipt};
pub use manager::NotificationManager;
pub use read_policy::{OptimisticReads, ReadPolicy, RemoteSync};
pub use source::{FallbackNotificationSource, NotificationSource, RemoteNotificationSource};
pub use source_policy::{SourcePolicy, SourceSelection, resolve_with_fallback};
