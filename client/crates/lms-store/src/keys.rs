/// Serialized `Identity`. Written only by the session manager.
pub const CURRENT_USER: &str = "currentUser";

/// Opaque bearer token, present only when a real backend is wired in.
pub const AUTH_TOKEN: &str = "authToken";

/// Left behind by older demo builds. Purged on logout.
pub const LEGACY_DEMO_USER: &str = "demoUser";

/// Plain theme name. Written only by the preferences manager.
pub const THEME: &str = "theme";

/// Plain language name. Written only by the preferences manager.
pub const LANGUAGE: &str = "language";

/// Keys removed when the user signs out.
pub const SESSION_KEYS: [&str; 2] = [CURRENT_USER, LEGACY_DEMO_USER];
