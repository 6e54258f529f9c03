pub mod app_context;
pub mod error;
pub mod logger;
pub mod views;

#[cfg(test)]
mod tests;

pub use app_context::AppContext;
pub use error::{AppError, Result as AppResult};
pub use views::{HeaderView, NotificationPanelView, ProfileSummaryView};
