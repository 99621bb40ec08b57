//! Identity session gate
//!
//! The reader only ever asks whether someone is signed in; account
//! management lives with the external identity collaborator. Nothing in
//! playback or translation consults this state.

/// Boolean authentication gate with login/logout triggers
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self { user: None }
    }

    /// Record a signed-in user
    pub fn login(&mut self, name: &str) {
        self.user = Some(name.to_string());
    }

    /// Clear the session, returning the user that was signed in
    pub fn logout(&mut self) -> Option<String> {
        self.user.take()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
