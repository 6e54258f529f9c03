//! Read-only consumers of the state stores.
//!
//! A view holds nothing but `watch` receivers; every `render()` derives its
//! text from the latest snapshots.

mod header_view;
mod notification_panel_view;
mod profile_summary_view;

pub use header_view::HeaderView;
pub use notification_panel_view::NotificationPanelView;
pub use profile_summary_view::ProfileSummaryView;

/// Unread badge text; `None` hides the badge.
pub fn badge_text(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=9 => Some(unread.to_string()),
        _ => Some("9+".to_string()),
    }
}
