use lms_core::Identity;

/// What the client knows about the acting user.
///
/// `Loading` means the persisted identity has not been read yet, which is
/// different from `Ready(None)`: definitely signed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Ready(Option<Identity>),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Ready(identity) => identity.as_ref(),
            Self::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}
