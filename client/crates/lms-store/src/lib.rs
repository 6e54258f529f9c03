//! Durable string-keyed storage shared by every state owner in the client.
//!
//! Each key has exactly one writer. See [`keys`] for who owns what.

mod error;
mod file_store;
pub mod keys;
mod memory_store;


pub use error::{Result as StoreResult, StoreError};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Get/set/remove of string blobs. A missing key is `Ok(None)`, never an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
