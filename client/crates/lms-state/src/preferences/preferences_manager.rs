use lms_core::{Language, Theme};
use lms_store::{KeyValueStore, keys};

use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferencesState {
    #[default]
    Loading,
    Ready(Preferences),
}

impl PreferencesState {
    /// Loaded preferences, or the defaults while still loading.
    pub fn preferences(&self) -> Preferences {
        match self {
            Self::Ready(prefs) => *prefs,
            Self::Loading => Preferences::default(),
        }
    }
}

/// Appearance owner; the only writer of the theme and language keys.
#[derive(Clone)]
pub struct PreferencesManager {
    store: Arc<dyn KeyValueStore>,
    state_tx: Arc<watch::Sender<PreferencesState>>,
}

impl PreferencesManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state_tx, _) = watch::channel(PreferencesState::Loading);

        Self {
            store,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Deferred first read; yields once so it never blocks the first render.
    pub async fn initialize(&self) {
        tokio::task::yield_now().await;

        self.ensure_loaded();
    }

    pub fn state(&self) -> PreferencesState {
        *self.state_tx.borrow()
    }

    pub fn preferences(&self) -> Preferences {
        self.state_tx.borrow().preferences()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreferencesState> {
        self.state_tx.subscribe()
    }

    /// Light or Dark; `System` resolved against the host preference.
    pub fn effective_theme(&self, system_prefers_dark: bool) -> Theme {
        self.preferences().theme.effective(system_prefers_dark)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update(keys::THEME, theme.as_str(), |prefs| prefs.theme = theme);
    }

    pub fn set_language(&self, language: Language) {
        self.update(keys::LANGUAGE, language.as_str(), |prefs| {
            prefs.language = language
        });
    }

    fn update(&self, key: &'static str, stored: &str, apply: impl FnOnce(&mut Preferences)) {
        self.ensure_loaded();

        let changed = self.state_tx.send_if_modified(|state| {
            let mut prefs = state.preferences();
            apply(&mut prefs);
            if *state == PreferencesState::Ready(prefs) {
                return false;
            }
            *state = PreferencesState::Ready(prefs);
            true
        });

        if changed && let Err(e) = self.store.set(key, stored) {
            warn!("Could not persist '{key}': {e}");
        }
    }

    /// Reads storage outside the state lock, then publishes unless another
    /// caller finished loading first.
    fn ensure_loaded(&self) {
        if *self.state_tx.borrow() != PreferencesState::Loading {
            return;
        }

        let loaded = Preferences {
            theme: self.read_or_default(keys::THEME),
            language: self.read_or_default(keys::LANGUAGE),
        };

        self.state_tx.send_if_modified(|state| {
            if *state != PreferencesState::Loading {
                return false;
            }
            *state = PreferencesState::Ready(loaded);
            true
        });
    }

    /// Unknown values are dropped from storage so the default sticks.
    fn read_or_default<T: FromStr + Default>(&self, key: &'static str) -> T {
        let stored = match self.store.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!("Could not read '{key}': {e}");
                return T::default();
            }
        };

        match stored.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Discarding unknown '{key}' value {stored:?}");
                if let Err(e) = self.store.remove(key) {
                    debug!("Could not remove '{key}': {e}");
                }
                T::default()
            }
        }
    }
}
