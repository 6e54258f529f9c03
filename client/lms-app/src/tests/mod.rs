
use crate::AppContext;

use lms_state::SourcePolicy;
use lms_store::{KeyValueStore, MemoryStore};

use std::sync::Arc;

/// Context over an in-memory store with remote data disabled.
pub(crate) async fn offline_context() -> AppContext {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let context = AppContext::with_parts(store, SourcePolicy::fallback_only()).unwrap();
    context.initialize().await;
    // let the identity watcher observe the loaded session
    tokio::task::yield_now().await;
    context
}
