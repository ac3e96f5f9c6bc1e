use chrono::{DateTime, Utc};
use signet_authority::AuthNotification;

use crate::app_core::{AppCore, CommandHandler};
use crate::commands::executor;
use crate::events::{AppCommand, Effect, SessionEvent};
use crate::input::{Key, KeyEvent};
use crate::session::reducer::Transition;
use crate::session::{AuthPhase, SessionStore};
use crate::state::AppState;
use crate::view::{self, ViewModel};

/// Mock command handler for tests (no authority, no tasks)
///
/// Commands are applied synchronously with execute_command_sync and every
/// effect production code would perform is recorded for assertions.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    effects: Vec<Effect>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandHandler for RecordingHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(effect) = executor::execute_command_sync(command, state) {
            self.effects.push(effect);
        }
    }
}

pub struct TestApp {
    core: AppCore<RecordingHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(RecordingHandler::new()),
        }
    }

    pub fn with_session(session: SessionStore) -> Self {
        Self {
            core: AppCore::with_session(RecordingHandler::new(), session),
        }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Inject an initiator result or local event
    pub fn send_event(&mut self, event: SessionEvent) -> Transition {
        self.core.handle_session_event(event)
    }

    pub fn send_event_at(&mut self, event: SessionEvent, now: DateTime<Utc>) -> Transition {
        self.core.handle_session_event_at(event, now)
    }

    /// Inject a notification pushed by the authority
    pub fn notify(&mut self, notification: AuthNotification) -> Transition {
        self.send_event(SessionEvent::Notification(notification))
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.state().session().phase
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> ViewModel {
        view::render(self.state().session(), self.state().method, now)
    }

    /// Effects requested so far, drained
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.core.handler_mut().effects)
    }

    pub fn assert_phase(&self, expected: &AuthPhase) {
        assert_eq!(
            self.phase(),
            expected,
            "Expected different session phase"
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
