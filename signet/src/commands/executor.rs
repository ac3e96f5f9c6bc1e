use chrono::{DateTime, Utc};
use signet_authority::AuthorityClient;

use crate::background::BackgroundTaskManager;
use crate::events::{AppCommand, Effect, SessionEvent};
use crate::initiator::FlowInitiator;
use crate::session::{AuthMethod, AuthPhase};
use crate::state::AppState;

/// Execute a command: apply its local part, then hand any authority request
/// to a background task. Results come back on the initiator's channel.
pub fn execute_command<C: AuthorityClient>(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    initiator: &FlowInitiator<C>,
) {
    let Some(effect) = apply_local(command, state, Utc::now()) else {
        return;
    };

    match effect {
        Effect::StartFlow(method) => initiator.spawn_start_flow(method, task_manager),
        Effect::Logout => initiator.spawn_logout(task_manager),
        Effect::OpenUri(uri) => {
            if let Err(e) = open::that(&uri) {
                tracing::warn!("Failed to open {} in a browser: {}", uri, e);
            }
        }
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Returns the side effect production code would perform; tests inject the
/// resulting `SessionEvent`s themselves.
///
/// NOTE: This is public for use by the testing module but should not be used in production code.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<Effect> {
    apply_local(command, state, Utc::now())
}

/// Local state changes for a command, plus the effect it still needs
pub fn apply_local(
    command: AppCommand,
    state: &mut AppState,
    now: DateTime<Utc>,
) -> Option<Effect> {
    match command {
        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }

        AppCommand::ToggleMethod => {
            let method = state.method.toggle();
            select_method(state, method, now);
            None
        }
        AppCommand::SelectMethod(method) => {
            select_method(state, method, now);
            None
        }

        AppCommand::StartSignIn => {
            let session = state.session();
            if session.is_initializing() || session.is_authenticated() {
                return None;
            }
            if session.request_in_flight() {
                tracing::debug!("Sign-in request already in flight, ignoring");
                return None;
            }
            let method = state.method;
            state
                .session
                .apply(SessionEvent::FlowStartRequested { method }, now);
            Some(Effect::StartFlow(method))
        }

        AppCommand::AbandonDeviceFlow => {
            state.session.apply(SessionEvent::DeviceFlowAbandoned, now);
            None
        }

        AppCommand::OpenVerificationUri => state
            .session()
            .challenge()
            .map(|challenge| Effect::OpenUri(challenge.verification_uri.clone())),

        AppCommand::Logout => state.session().is_authenticated().then_some(Effect::Logout),
    }
}

/// Moving off the device method drops a pending device flow on this side only
fn select_method(state: &mut AppState, method: AuthMethod, now: DateTime<Utc>) {
    if state.method == method {
        return;
    }
    state.method = method;

    let device_pending = matches!(state.session().phase, AuthPhase::DevicePending { .. });
    if device_pending && method != AuthMethod::Device {
        state.session.apply(SessionEvent::DeviceFlowAbandoned, now);
    }
}

/// Production command handler: owns the background tasks and the initiator
pub struct Executor<C> {
    initiator: FlowInitiator<C>,
    task_manager: BackgroundTaskManager,
}

impl<C: AuthorityClient> Executor<C> {
    pub fn new(initiator: FlowInitiator<C>) -> Self {
        Self {
            initiator,
            task_manager: BackgroundTaskManager::new(),
        }
    }

    pub fn query_status(&mut self) {
        tracing::info!("Querying authority for an existing session");
        self.initiator.spawn_status_query(&mut self.task_manager);
    }

    pub fn shutdown(&mut self) {
        self.task_manager.cancel_all();
    }
}

impl<C: AuthorityClient> crate::app_core::CommandHandler for Executor<C> {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        execute_command(command, state, &mut self.task_manager, &self.initiator);
    }
}
