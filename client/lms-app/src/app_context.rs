use crate::error::Result as AppResult;
use crate::views::{HeaderView, NotificationPanelView, ProfileSummaryView};

use lms_config::Config;
use lms_gateway::Gateway;
use lms_state::{
    NotificationManager, PreferencesManager, RemoteNotificationSource, SessionManager,
    SourcePolicy,
};
use lms_store::{FileStore, KeyValueStore};

use std::sync::Arc;

use log::info;

/// Every state owner of the running client, built once and handed to views.
///
/// Views receive snapshots from here; nothing else holds session,
/// notification or preference state.
#[derive(Clone)]
pub struct AppContext {
    pub session: SessionManager,
    pub notifications: NotificationManager,
    pub preferences: PreferencesManager,
}

impl AppContext {
    /// Builds the production stores from `config` and runs deferred loading.
    pub async fn bootstrap(config: &Config) -> AppResult<Self> {
        let storage_path = config.storage_path()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(storage_path.clone())?);
        info!("Persistent store: {}", storage_path.display());

        let sources = if config.api.enabled {
            let gateway = Gateway::from_config(&config.api, Arc::clone(&store))?;
            info!("Notifications from {}", gateway.base_url);
            SourcePolicy::new(Arc::new(RemoteNotificationSource::new(gateway)))
        } else {
            info!("Remote API disabled, using fallback notifications");
            SourcePolicy::fallback_only()
        };

        let context = Self::with_parts(store, sources)?;
        context.initialize().await;

        Ok(context)
    }

    /// Wires stores over the given parts without loading anything yet.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_parts(store: Arc<dyn KeyValueStore>, sources: SourcePolicy) -> AppResult<Self> {
        let session = SessionManager::new(Arc::clone(&store));
        let notifications = NotificationManager::new(sources)?;
        let preferences = PreferencesManager::new(store);

        // Exits on its own once the session store is dropped
        notifications.watch_session(session.transitions());

        Ok(Self {
            session,
            notifications,
            preferences,
        })
    }

    /// Deferred first read of persisted session and preferences.
    pub async fn initialize(&self) {
        tokio::join!(self.session.initialize(), self.preferences.initialize());
    }

    pub fn header_view(&self) -> HeaderView {
        HeaderView::new(self.session.subscribe(), self.notifications.subscribe())
    }

    pub fn notification_panel_view(&self) -> NotificationPanelView {
        NotificationPanelView::new(self.notifications.subscribe())
    }

    pub fn profile_summary_view(&self) -> ProfileSummaryView {
        ProfileSummaryView::new(self.session.subscribe())
    }
}
