use chrono::{DateTime, Utc};
use std::fmt;

use super::reducer::{reduce_session_event, Transition};
use super::{SessionState, UserProfile};
use crate::events::SessionEvent;

type SuccessCallback = Box<dyn FnMut(&UserProfile) + Send>;

/// Owns the session state and reports every entry into the authenticated state
/// (including restoration on relaunch) to the hosting application.
pub struct SessionStore {
    state: SessionState,
    on_auth_success: Option<SuccessCallback>,
}

impl SessionStore {
    /// New store in the `Initializing` phase
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            on_auth_success: None,
        }
    }

    /// Register the callback invoked with the user on each transition into `Authenticated`
    pub fn on_auth_success<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&UserProfile) + Send + 'static,
    {
        self.on_auth_success = Some(Box::new(callback));
        self
    }

    pub fn apply(&mut self, event: SessionEvent, now: DateTime<Utc>) -> Transition {
        let transition = reduce_session_event(&mut self.state, event, now);

        if let Transition::Authenticated(user) = &transition {
            if let Some(callback) = self.on_auth_success.as_mut() {
                callback(user);
            }
        }

        transition
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("on_auth_success", &self.on_auth_success.is_some())
            .finish()
    }
}
