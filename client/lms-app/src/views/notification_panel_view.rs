use lms_state::NotificationFeed;

use tokio::sync::watch;

/// Dropdown listing the current notifications.
pub struct NotificationPanelView {
    feed: watch::Receiver<NotificationFeed>,
}

impl NotificationPanelView {
    pub fn new(feed: watch::Receiver<NotificationFeed>) -> Self {
        Self { feed }
    }

    pub fn render(&self) -> String {
        let feed = self.feed.borrow();

        let mut heading = match feed.unread_count() {
            0 => "Notifications".to_string(),
            unread => format!("Notifications ({unread} unread)"),
        };
        if feed.loading {
            heading.push_str(" - refreshing");
        }

        if feed.is_empty() {
            return format!("{heading}\nNo notifications");
        }

        let mut lines = vec![heading];
        lines.extend(feed.records.iter().map(|n| {
            let marker = if n.is_unread() { '*' } else { ' ' };
            format!("{marker} {} {}: {} ({})", n.icon, n.title, n.message, n.time)
        }));

        lines.join("\n")
    }

    pub async fn changed(&mut self) -> bool {
        self.feed.changed().await.is_ok()
    }
}
