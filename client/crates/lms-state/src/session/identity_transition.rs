use lms_core::Identity;

/// The acting user as of the latest identity change.
///
/// `epoch` increases on every change of acting user, including sign-out and
/// signing back in as the same user, so a follower that only sees the latest
/// value can still tell that a transition happened. Profile edits update
/// `identity` without bumping `epoch`. Epoch 0 means not loaded yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityTransition {
    pub epoch: u64,
    pub identity: Option<Identity>,
}

impl IdentityTransition {
    pub fn is_loaded(&self) -> bool {
        self.epoch > 0
    }
}
