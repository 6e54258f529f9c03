use std::panic::Location;

use error_location::ErrorLocation;
use lms_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("No async runtime available: {message} {location}")]
    Runtime {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Store {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Persisted value under '{key}' is corrupted: {message} {location}")]
    Corrupted {
        key: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl StateError {
    #[track_caller]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupted(key: &'static str, message: impl Into<String>) -> Self {
        Self::Corrupted {
            key,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for StateError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StateError>;
