use chrono::{DateTime, Utc};
use signet_authority::AuthNotification;

use super::{
    AuthMethod, AuthPhase, DeviceCodeChallenge, FlowError, FlowErrorKind, SessionState,
    UserProfile, CHALLENGE_EXPIRED_MESSAGE,
};
use crate::events::SessionEvent;

/// Outcome of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Updated,
    /// Entered (or refreshed) the authenticated state with this user
    Authenticated(UserProfile),
}

/// Pure state transition function for session events
///
/// Every event is handled on its own merits: notifications may arrive before,
/// after or between initiator results, so no arm assumes what came before it.
pub fn reduce_session_event(
    state: &mut SessionState,
    event: SessionEvent,
    now: DateTime<Utc>,
) -> Transition {
    match event {
        SessionEvent::StatusLoaded(status) => {
            if !state.is_initializing() {
                tracing::debug!("Ignoring status result, session already resolved");
                return Transition::Unchanged;
            }
            match (status.authenticated, status.user) {
                (true, Some(user)) => authenticate(state, user),
                (true, None) => {
                    tracing::warn!("Authority reported a session without a user profile");
                    // An error pushed while initializing stays visible
                    let next = state.with(AuthPhase::Unauthenticated, state.error.clone());
                    settle(state, next)
                }
                (false, _) => {
                    tracing::info!("No active session");
                    let next = state.with(AuthPhase::Unauthenticated, state.error.clone());
                    settle(state, next)
                }
            }
        }

        SessionEvent::StatusQueryFailed { error } => {
            if !state.is_initializing() {
                return Transition::Unchanged;
            }
            tracing::warn!("Status query failed, treating session as signed out: {}", error);
            let next = state.with(AuthPhase::Unauthenticated, state.error.clone());
            settle(state, next)
        }

        SessionEvent::FlowStartRequested { method } => {
            tracing::info!("Requesting {} sign-in", method.display_name());
            let next = SessionState {
                starting: Some(method),
                ..state.with(state.phase.clone(), None)
            };
            settle(state, next)
        }

        SessionEvent::FlowStartAccepted { method } => flow_start_accepted(state, method),

        SessionEvent::FlowStartRejected { method, message } => {
            tracing::warn!("{} sign-in rejected: {}", method.display_name(), message);
            let error = FlowError::new(FlowErrorKind::FlowStartRejected, message, now);
            flow_start_failed(state, error)
        }

        SessionEvent::FlowStartUndelivered { method, error } => {
            tracing::warn!(
                "{} sign-in request not delivered: {}",
                method.display_name(),
                error
            );
            let error = FlowError::new(FlowErrorKind::CommandTransportFailure, error, now);
            flow_start_failed(state, error)
        }

        SessionEvent::LogoutFailed { message } => {
            tracing::warn!("Sign out failed: {}", message);
            let error = FlowError::new(FlowErrorKind::LogoutFailed, message, now);
            let next = state.with(state.phase.clone(), Some(error));
            settle(state, next)
        }

        SessionEvent::DeviceFlowAbandoned => {
            if !matches!(state.phase, AuthPhase::DevicePending { .. }) {
                return Transition::Unchanged;
            }
            tracing::info!("Device sign-in abandoned locally");
            let next = state.with(AuthPhase::Unauthenticated, None);
            settle(state, next)
        }

        SessionEvent::Notification(notification) => {
            reduce_notification(state, notification, now)
        }
    }
}

fn reduce_notification(
    state: &mut SessionState,
    notification: AuthNotification,
    now: DateTime<Utc>,
) -> Transition {
    match notification {
        AuthNotification::AuthSuccess { user } => {
            tracing::info!("Signed in as {}", user.display_name);
            authenticate(state, user)
        }

        AuthNotification::AuthRestored { user } => {
            tracing::info!("Session restored for {}", user.display_name);
            authenticate(state, user)
        }

        AuthNotification::AuthError { message } => {
            let phase = match &state.phase {
                AuthPhase::Authenticated { .. } => {
                    tracing::warn!("Ignoring flow error while signed in: {}", message);
                    return Transition::Unchanged;
                }
                AuthPhase::BrowserPending | AuthPhase::DevicePending { .. } => {
                    AuthPhase::Unauthenticated
                }
                phase @ (AuthPhase::Initializing | AuthPhase::Unauthenticated) => phase.clone(),
            };
            tracing::warn!("Sign-in failed: {}", message);
            let error = FlowError::new(FlowErrorKind::FlowFailed, message, now);
            let next = state.with(phase, Some(error));
            settle(state, next)
        }

        AuthNotification::AuthLogout => {
            tracing::info!("Session ended");
            let next = state.with(AuthPhase::Unauthenticated, None);
            settle(state, next)
        }

        AuthNotification::DeviceCodeRequired {
            verification_uri,
            user_code,
            expires_in_seconds,
        } => {
            let accepts_code = match state.phase {
                AuthPhase::Unauthenticated | AuthPhase::DevicePending { .. } => true,
                // Device start requested over a browser flow, code outran the acceptance
                AuthPhase::BrowserPending => state.starting == Some(AuthMethod::Device),
                AuthPhase::Initializing | AuthPhase::Authenticated { .. } => false,
            };
            if !accepts_code {
                tracing::debug!("Ignoring device code, no device sign-in is pending");
                return Transition::Unchanged;
            }
            tracing::info!(
                "Device code issued, expires in {} seconds",
                expires_in_seconds
            );
            let challenge = DeviceCodeChallenge {
                verification_uri,
                user_code,
                expires_in_seconds,
                issued_at: now,
            };
            let next = state.with(
                AuthPhase::DevicePending {
                    challenge: Some(challenge),
                },
                None,
            );
            settle(state, next)
        }

        AuthNotification::DeviceCodeExpired { user_code } => {
            let matches_current = state.challenge().is_some_and(|challenge| {
                user_code
                    .as_ref()
                    .is_none_or(|code| *code == challenge.user_code)
            });
            if !matches_current {
                tracing::debug!("Ignoring stale device code expiry");
                return Transition::Unchanged;
            }
            tracing::info!("Device code expired");
            let error = FlowError::new(
                FlowErrorKind::ChallengeExpired,
                CHALLENGE_EXPIRED_MESSAGE,
                now,
            );
            let next = state.with(AuthPhase::Unauthenticated, Some(error));
            settle(state, next)
        }
    }
}

fn flow_start_accepted(state: &mut SessionState, method: AuthMethod) -> Transition {
    let resolved = matches!(
        state.phase,
        AuthPhase::Initializing | AuthPhase::Authenticated { .. }
    );
    if resolved || failed_before_acceptance(state, method) {
        tracing::debug!("Start accepted after the flow already settled, keeping state");
        let next = SessionState {
            starting: None,
            ..state.clone()
        };
        return settle(state, next);
    }

    let phase = match (&state.phase, method) {
        // Challenge outran the acceptance
        (AuthPhase::DevicePending { challenge: Some(_) }, AuthMethod::Device) => {
            state.phase.clone()
        }
        (_, AuthMethod::Browser) => AuthPhase::BrowserPending,
        (_, AuthMethod::Device) => AuthPhase::DevicePending { challenge: None },
    };
    let next = SessionState {
        phase,
        error: None,
        starting: None,
    };
    settle(state, next)
}

/// An `auth-error` landed between the start request and its acceptance
fn failed_before_acceptance(state: &SessionState, method: AuthMethod) -> bool {
    state.starting == Some(method)
        && matches!(state.phase, AuthPhase::Unauthenticated)
        && state
            .error
            .as_ref()
            .is_some_and(|e| e.kind == FlowErrorKind::FlowFailed)
}

fn flow_start_failed(state: &mut SessionState, error: FlowError) -> Transition {
    let phase = match &state.phase {
        AuthPhase::Authenticated { .. } => state.phase.clone(),
        _ => AuthPhase::Unauthenticated,
    };
    let next = SessionState {
        phase,
        error: Some(error),
        starting: None,
    };
    settle(state, next)
}

fn authenticate(state: &mut SessionState, user: UserProfile) -> Transition {
    let next = state.with(AuthPhase::Authenticated { user: user.clone() }, None);
    *state = next;
    Transition::Authenticated(user)
}

/// Replace the whole state in one step
fn settle(state: &mut SessionState, next: SessionState) -> Transition {
    if next == *state {
        return Transition::Unchanged;
    }
    *state = next;
    Transition::Updated
}
