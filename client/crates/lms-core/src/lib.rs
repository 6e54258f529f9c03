pub mod error;
pub mod models;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::identity::{Identity, IdentityPatch};
pub use models::language::Language;
pub use models::notification::{NotificationCategory, NotificationRecord, fallback_set};
pub use models::role::Role;
pub use models::route::Route;
pub use models::theme::Theme;
