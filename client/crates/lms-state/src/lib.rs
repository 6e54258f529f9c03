//! Client-side session, notification and preference state.
//!
//! Every owner is an explicit store object publishing snapshots over a
//! `tokio::sync::watch` channel. Consumers hold receivers and never keep
//! their own copy of this state.

pub mod error;
pub mod notifications;
pub mod preferences;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{Result as StateResult, StateError};
pub use notifications::{
    FallbackNotificationSource, NotificationFeed, NotificationManager, NotificationSource,
    OptimisticReads, ReadPolicy, ReadReceipt, RemoteNotificationSource, RemoteSync,
    SourcePolicy, SourceSelection, resolve_with_fallback,
};
pub use preferences::{Preferences, PreferencesManager, PreferencesState};
pub use session::{IdentityTransition, SessionManager, SessionState};
