use throbber_widgets_tui::ThrobberState;

use crate::session::{AuthMethod, SessionState, SessionStore};

/// Everything the terminal front end holds between frames
#[derive(Debug, Default)]
pub struct AppState {
    pub session: SessionStore,
    /// Flow the user will start next
    pub method: AuthMethod,
    pub help_visible: bool,
    pub should_quit: bool,
    pub throbber: ThrobberState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: SessionStore) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    /// Whether the throbber should advance on the next tick
    pub fn is_busy(&self) -> bool {
        let session = self.session();
        session.is_initializing() || session.is_pending() || session.request_in_flight()
    }
}
