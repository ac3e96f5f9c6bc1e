use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::session::{AuthMethod, AuthPhase};
use crate::state::AppState;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.modifiers.ctrl && key == Key::Char('c') {
        return Some(AppCommand::Quit);
    }

    // Help popup swallows everything except closing it
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    match key {
        Key::Char('?') => return Some(AppCommand::ToggleHelp),
        Key::Char('q') => return Some(AppCommand::Quit),
        _ => {}
    }

    match &state.session().phase {
        AuthPhase::Initializing => None,
        AuthPhase::Authenticated { .. } => match key {
            Key::Char('L') => Some(AppCommand::Logout),
            _ => None,
        },
        phase => handle_sign_in_keys(key, phase),
    }
}

fn handle_sign_in_keys(key: Key, phase: &AuthPhase) -> Option<AppCommand> {
    let device_pending = matches!(phase, AuthPhase::DevicePending { .. });

    match key {
        Key::Tab | Key::BackTab => Some(AppCommand::ToggleMethod),
        Key::Left => Some(AppCommand::SelectMethod(AuthMethod::Browser)),
        Key::Right => Some(AppCommand::SelectMethod(AuthMethod::Device)),
        Key::Enter => Some(AppCommand::StartSignIn),
        Key::Esc if device_pending => Some(AppCommand::AbandonDeviceFlow),
        Key::Char('o') => match phase {
            AuthPhase::DevicePending {
                challenge: Some(_),
            } => Some(AppCommand::OpenVerificationUri),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SessionEvent;
    use chrono::Utc;
    use signet_authority::{AuthNotification, StatusResponse, UserProfile};

    fn state_after(events: Vec<SessionEvent>) -> AppState {
        let mut state = AppState::new();
        for event in events {
            state.session.apply(event, Utc::now());
        }
        state
    }

    fn signed_out_state() -> AppState {
        state_after(vec![SessionEvent::StatusLoaded(StatusResponse::signed_out())])
    }

    fn device_code() -> SessionEvent {
        SessionEvent::Notification(AuthNotification::DeviceCodeRequired {
            verification_uri: "https://x/activate".to_string(),
            user_code: "ABCD-1234".to_string(),
            expires_in_seconds: 600,
        })
    }

    fn key(key: Key) -> KeyEvent {
        KeyEvent::new(key)
    }

    #[test]
    fn test_initializing_ignores_sign_in_keys() {
        let state = AppState::new();
        assert_eq!(handle_key_input(key(Key::Enter), &state), None);
        assert_eq!(handle_key_input(key(Key::Tab), &state), None);
        assert_eq!(
            handle_key_input(key(Key::Char('q')), &state),
            Some(AppCommand::Quit)
        );
    }

    #[test]
    fn test_signed_out_keys() {
        let state = signed_out_state();
        assert_eq!(
            handle_key_input(key(Key::Enter), &state),
            Some(AppCommand::StartSignIn)
        );
        assert_eq!(
            handle_key_input(key(Key::Tab), &state),
            Some(AppCommand::ToggleMethod)
        );
        assert_eq!(
            handle_key_input(key(Key::Right), &state),
            Some(AppCommand::SelectMethod(AuthMethod::Device))
        );
        assert_eq!(handle_key_input(key(Key::Esc), &state), None);
        assert_eq!(handle_key_input(key(Key::Char('o')), &state), None);
        assert_eq!(handle_key_input(key(Key::Char('L')), &state), None);
    }

    #[test]
    fn test_device_pending_keys() {
        let waiting = state_after(vec![
            SessionEvent::StatusLoaded(StatusResponse::signed_out()),
            SessionEvent::FlowStartAccepted {
                method: AuthMethod::Device,
            },
        ]);
        assert_eq!(
            handle_key_input(key(Key::Esc), &waiting),
            Some(AppCommand::AbandonDeviceFlow)
        );
        assert_eq!(handle_key_input(key(Key::Char('o')), &waiting), None);

        let with_code = state_after(vec![
            SessionEvent::StatusLoaded(StatusResponse::signed_out()),
            device_code(),
        ]);
        assert_eq!(
            handle_key_input(key(Key::Char('o')), &with_code),
            Some(AppCommand::OpenVerificationUri)
        );
    }

    #[test]
    fn test_authenticated_only_allows_sign_out() {
        let state = state_after(vec![SessionEvent::StatusLoaded(StatusResponse::signed_in(
            UserProfile {
                id: "u1".to_string(),
                display_name: "Ann".to_string(),
                email: None,
                avatar_url: None,
            },
        ))]);

        assert_eq!(
            handle_key_input(key(Key::Char('L')), &state),
            Some(AppCommand::Logout)
        );
        assert_eq!(handle_key_input(key(Key::Enter), &state), None);
        assert_eq!(handle_key_input(key(Key::Tab), &state), None);
    }

    #[test]
    fn test_help_popup_captures_keys() {
        let mut state = signed_out_state();
        state.help_visible = true;

        assert_eq!(handle_key_input(key(Key::Enter), &state), None);
        assert_eq!(
            handle_key_input(key(Key::Esc), &state),
            Some(AppCommand::ToggleHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut state = signed_out_state();
        state.help_visible = true;
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('c')), &state),
            Some(AppCommand::Quit)
        );
    }
}
