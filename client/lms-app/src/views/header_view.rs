use crate::views::badge_text;

use lms_state::{NotificationFeed, SessionState};

use tokio::sync::watch;

/// Top bar: who is signed in and how many notifications are unread.
pub struct HeaderView {
    session: watch::Receiver<SessionState>,
    feed: watch::Receiver<NotificationFeed>,
}

impl HeaderView {
    pub fn new(
        session: watch::Receiver<SessionState>,
        feed: watch::Receiver<NotificationFeed>,
    ) -> Self {
        Self { session, feed }
    }

    pub fn badge(&self) -> Option<String> {
        badge_text(self.feed.borrow().unread_count())
    }

    pub fn render(&self) -> String {
        let identity = match &*self.session.borrow() {
            SessionState::Loading => return "Loading...".to_string(),
            SessionState::Ready(None) => return "Sign in".to_string(),
            SessionState::Ready(Some(identity)) => identity.clone(),
        };

        let bell = match self.badge() {
            Some(badge) => format!("🔔 {badge}"),
            None => "🔔".to_string(),
        };

        format!(
            "[{}] {} ({}) | {bell}",
            identity.initials(),
            identity.name,
            identity.role.as_str()
        )
    }

    /// Resolves once either store publishes a new snapshot. `false` when a
    /// store has been dropped.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            result = self.session.changed() => result.is_ok(),
            result = self.feed.changed() => result.is_ok(),
        }
    }
}
