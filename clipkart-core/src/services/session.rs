//! Session - who is signed in for the lifetime of the process

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::SessionUser;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(SessionUser),
}

/// Observable session state, shared behind an `Arc`
pub struct Session {
    state: watch::Sender<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self { state }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        match &*self.state.borrow() {
            SessionState::LoggedIn(user) => Some(user.clone()),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::LoggedIn(_))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn sign_in(&self, user: SessionUser) {
        self.state.send_replace(SessionState::LoggedIn(user));
    }

    /// Back to `LoggedOut`
    pub fn clear(&self) {
        self.state.send_if_modified(|state| {
            if *state == SessionState::LoggedOut {
                return false;
            }
            *state = SessionState::LoggedOut;
            true
        });
    }
}
