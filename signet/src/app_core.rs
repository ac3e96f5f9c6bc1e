use chrono::{DateTime, Utc};

use crate::commands::handlers;
use crate::events::{AppCommand, SessionEvent};
use crate::input::KeyEvent;
use crate::session::reducer::Transition;
use crate::session::SessionStore;
use crate::state::AppState;

/// Trait for handling command execution (production = background tasks, test = recording mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that never talks to an authority.
pub trait CommandHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler). In production the handler spawns initiator
/// tasks; in tests it records the requested effects.
pub struct AppCore<H: CommandHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: CommandHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self::with_session(handler, SessionStore::new())
    }

    /// Start from a pre-configured store (e.g. with a success callback)
    pub fn with_session(handler: H, session: SessionStore) -> Self {
        Self {
            ui_state: AppState::with_session(session),
            handler,
        }
    }

    /// Translate a key press to an AppCommand and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::info!("Executing command: {:?}", command);
            self.handler.execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Apply an initiator result or notification
    pub fn handle_session_event(&mut self, event: SessionEvent) -> Transition {
        self.handle_session_event_at(event, Utc::now())
    }

    pub fn handle_session_event_at(
        &mut self,
        event: SessionEvent,
        now: DateTime<Utc>,
    ) -> Transition {
        self.ui_state.session.apply(event, now)
    }

    /// Advance the loading animation
    pub fn tick(&mut self) {
        if self.ui_state.is_busy() {
            self.ui_state.throbber.calc_next();
        }
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
