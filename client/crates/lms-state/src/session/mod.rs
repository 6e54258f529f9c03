mod identity_transition;
mod session_manager;
mod session_state;

pub use identity_transition::IdentityTransition;
pub use session_manager::SessionManager;
pub use session_state::SessionState;
