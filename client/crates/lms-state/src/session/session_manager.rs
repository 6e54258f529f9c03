use crate::{IdentityTransition, SessionState, StateError, StateResult};

use lms_core::{Identity, IdentityPatch, Route, registry};
use lms_store::{KeyValueStore, keys};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{broadcast, watch};

const NAVIGATION_CAPACITY: usize = 16;

/// Owns the current identity and is the only writer of the identity key.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn KeyValueStore>,
    state_tx: watch::Sender<SessionState>,
    transition_tx: watch::Sender<IdentityTransition>,
    navigation_tx: broadcast::Sender<Route>,
}

impl SessionManager {
    /// Creates a manager in the `Loading` state. Nothing is read until
    /// [`initialize`](Self::initialize) runs or the first mutation arrives.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        let (transition_tx, _) = watch::channel(IdentityTransition::default());
        let (navigation_tx, _) = broadcast::channel(NAVIGATION_CAPACITY);

        Self {
            inner: Arc::new(SessionInner {
                store,
                state_tx,
                transition_tx,
                navigation_tx,
            }),
        }
    }

    /// Deferred load of the persisted identity.
    ///
    /// Yields to the scheduler once before touching storage so it never runs
    /// ahead of the first render. Calling it again is a no-op.
    pub async fn initialize(&self) {
        tokio::task::yield_now().await;

        self.ensure_loaded();
    }

    pub fn state(&self) -> SessionState {
        self.inner.state_tx.borrow().clone()
    }

    /// The acting user, or `None` when signed out or not loaded yet.
    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.state_tx.borrow().identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state_tx.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state_tx.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }

    /// Changes of acting user, numbered. Follow this instead of
    /// [`subscribe`](Self::subscribe) when every sign-in and sign-out must
    /// be observed, even ones that end on the identity it started from.
    pub fn transitions(&self) -> watch::Receiver<IdentityTransition> {
        self.inner.transition_tx.subscribe()
    }

    /// Route requests emitted after login and logout.
    pub fn navigation(&self) -> broadcast::Receiver<Route> {
        self.inner.navigation_tx.subscribe()
    }

    /// Demo-grade credential check against the fixed registry.
    ///
    /// Returns false and leaves state untouched on any mismatch.
    pub fn login(&self, email: &str, secret: &str) -> bool {
        let Some(identity) = registry::authenticate(email, secret) else {
            debug!("Rejected login for {email}");
            return false;
        };

        info!("Logged in as {} ({})", identity.id, identity.role.as_str());
        self.replace(Some(identity));
        self.navigate(Route::Dashboard);
        true
    }

    /// Unconditionally replaces the acting user. Used by the demo switcher.
    pub fn switch_identity(&self, identity: Identity) {
        info!("Switched identity to {}", identity.id);
        self.replace(Some(identity));
    }

    /// Merges `patch` into the current identity. No-op when signed out.
    pub fn update_identity(&self, patch: IdentityPatch) {
        self.ensure_loaded();

        let mut updated = None;
        self.inner.state_tx.send_if_modified(|state| {
            let SessionState::Ready(Some(identity)) = state else {
                return false;
            };

            let before = identity.clone();
            identity.apply(patch);
            if *identity == before {
                return false;
            }

            updated = Some(identity.clone());
            true
        });

        let Some(identity) = updated else {
            debug!("Profile update changed nothing");
            return;
        };

        self.persist(Some(&identity));
        // Same acting user: keep the epoch, refresh the snapshot silently
        self.inner.transition_tx.send_if_modified(|transition| {
            transition.identity = Some(identity);
            false
        });
    }

    /// Signs out, purges session keys, and asks for the login view.
    pub fn logout(&self) {
        self.replace(None);

        for key in keys::SESSION_KEYS {
            if let Err(e) = self.inner.store.remove(key) {
                warn!("Could not purge '{key}' on logout: {e}");
            }
        }

        info!("Logged out");
        self.navigate(Route::Login);
    }

    fn replace(&self, identity: Option<Identity>) {
        self.ensure_loaded();

        let changed = self.inner.state_tx.send_if_modified(|state| {
            if state.identity() == identity.as_ref() {
                return false;
            }
            *state = SessionState::Ready(identity.clone());
            true
        });

        if changed {
            self.persist(identity.as_ref());
            self.begin_transition(identity);
        }
    }

    /// Completes a pending load so a write never races the read. Storage is
    /// read before the state lock is taken.
    fn ensure_loaded(&self) {
        if !self.is_loading() {
            return;
        }

        let identity = self.load_persisted();
        let loaded = self.inner.state_tx.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = SessionState::Ready(identity.clone());
            true
        });

        if loaded {
            self.begin_transition(identity);
        }
    }

    fn begin_transition(&self, identity: Option<Identity>) {
        self.inner.transition_tx.send_modify(|transition| {
            transition.epoch += 1;
            transition.identity = identity;
        });
    }

    fn load_persisted(&self) -> Option<Identity> {
        match read_identity(self.inner.store.as_ref()) {
            Ok(identity) => identity,
            Err(StateError::Corrupted { message, .. }) => {
                warn!("Discarding corrupted persisted identity: {message}");
                if let Err(e) = self.inner.store.remove(keys::CURRENT_USER) {
                    warn!("Could not remove corrupted identity: {e}");
                }
                None
            }
            Err(e) => {
                warn!("Could not read persisted identity: {e}");
                None
            }
        }
    }

    fn persist(&self, identity: Option<&Identity>) {
        let result = match identity {
            Some(identity) => serde_json::to_string(identity)
                .map_err(|e| StateError::corrupted(keys::CURRENT_USER, e.to_string()))
                .and_then(|json| Ok(self.inner.store.set(keys::CURRENT_USER, &json)?)),
            None => self
                .inner
                .store
                .remove(keys::CURRENT_USER)
                .map_err(StateError::from),
        };

        if let Err(e) = result {
            warn!("Could not persist identity: {e}");
        }
    }

    fn navigate(&self, route: Route) {
        debug!("Navigate to {}", route.path());
        // No receivers simply means no view is listening yet.
        let _ = self.inner.navigation_tx.send(route);
    }
}

fn read_identity(store: &dyn KeyValueStore) -> StateResult<Option<Identity>> {
    let Some(blob) = store.get(keys::CURRENT_USER)? else {
        return Ok(None);
    };

    serde_json::from_str(&blob)
        .map(Some)
        .map_err(|e| StateError::corrupted(keys::CURRENT_USER, e.to_string()))
}
