use lms_state::SessionState;

use tokio::sync::watch;

/// Dashboard greeting and short profile card.
pub struct ProfileSummaryView {
    session: watch::Receiver<SessionState>,
}

impl ProfileSummaryView {
    pub fn new(session: watch::Receiver<SessionState>) -> Self {
        Self { session }
    }

    pub fn greeting(&self) -> Option<String> {
        let state = self.session.borrow();
        let identity = state.identity()?;
        let first_name = identity.name.split_whitespace().next().unwrap_or("there");

        Some(format!("Welcome back, {first_name}!"))
    }

    pub fn render(&self) -> String {
        let identity = match &*self.session.borrow() {
            SessionState::Loading => return "Loading profile...".to_string(),
            SessionState::Ready(None) => return "Not signed in".to_string(),
            SessionState::Ready(Some(identity)) => identity.clone(),
        };

        let mut lines = vec![
            self.greeting().unwrap_or_default(),
            format!("{} <{}>", identity.name, identity.email),
        ];
        if let Some(about_me) = identity.about_me.as_deref().filter(|s| !s.is_empty()) {
            lines.push(about_me.to_string());
        }

        lines.join("\n")
    }

    pub async fn changed(&mut self) -> bool {
        self.session.changed().await.is_ok()
    }
}
