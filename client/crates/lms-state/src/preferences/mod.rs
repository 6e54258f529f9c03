mod preferences_manager;

pub use preferences_manager::{Preferences, PreferencesManager, PreferencesState};
