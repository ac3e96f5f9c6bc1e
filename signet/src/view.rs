//! Maps session state to what the sign-in screen shows.
//!
//! Everything here is a pure function of its arguments; the terminal layer
//! in `ui` only draws the resulting [`ViewModel`].

use chrono::{DateTime, Utc};

use crate::session::{AuthMethod, AuthPhase, DeviceCodeChallenge, SessionState};

pub const LOCALLY_EXPIRED_MESSAGE: &str = "Code expired. Press Enter for a new one.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCodeView {
    pub verification_uri: String,
    pub user_code: String,
    /// Remaining time as `mm:ss`
    pub countdown: String,
    pub remaining_seconds: u64,
    /// The countdown ran out before the authority said so
    pub expired: bool,
}

impl DeviceCodeView {
    fn new(challenge: &DeviceCodeChallenge, now: DateTime<Utc>) -> Self {
        let remaining_seconds = challenge.remaining_seconds(now);
        Self {
            verification_uri: challenge.verification_uri.clone(),
            user_code: challenge.user_code.clone(),
            countdown: format_countdown(remaining_seconds),
            remaining_seconds,
            expired: remaining_seconds == 0,
        }
    }
}

/// What the sign-in panel shows below the method selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Waiting {
    /// Start request sent, no answer yet
    Starting(AuthMethod),
    Browser,
    /// Device flow accepted, code not received yet
    DeviceCodeRequested,
    DeviceCode(DeviceCodeView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading,
    SignIn {
        selected: AuthMethod,
        waiting: Option<Waiting>,
    },
    SignedIn {
        display_name: String,
        email: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub body: Body,
    pub error: Option<String>,
    /// Show the throbber
    pub busy: bool,
    pub hints: Vec<KeyHint>,
}

pub fn render(session: &SessionState, method: AuthMethod, now: DateTime<Utc>) -> ViewModel {
    let status = session.status();
    let error = session.error.as_ref().map(|e| e.message.clone());

    if status.loading {
        return ViewModel {
            body: Body::Loading,
            error: None,
            busy: true,
            hints: vec![hint("q", "quit")],
        };
    }

    if let Some(user) = status.user.filter(|_| status.authenticated) {
        return ViewModel {
            body: Body::SignedIn {
                display_name: user.display_name,
                email: user.email,
            },
            error,
            busy: false,
            hints: vec![hint("L", "sign out"), hint("?", "help"), hint("q", "quit")],
        };
    }

    let waiting = match &session.phase {
        AuthPhase::BrowserPending => Some(Waiting::Browser),
        AuthPhase::DevicePending { challenge: None } => Some(Waiting::DeviceCodeRequested),
        AuthPhase::DevicePending {
            challenge: Some(challenge),
        } => Some(Waiting::DeviceCode(DeviceCodeView::new(challenge, now))),
        _ => session.starting.map(Waiting::Starting),
    };

    let code_expired = matches!(&waiting, Some(Waiting::DeviceCode(code)) if code.expired);
    let error = match error {
        None if code_expired => Some(LOCALLY_EXPIRED_MESSAGE.to_string()),
        error => error,
    };

    let busy = match &waiting {
        Some(Waiting::DeviceCode(_)) => !code_expired,
        Some(_) => true,
        None => false,
    };

    ViewModel {
        hints: sign_in_hints(&waiting),
        body: Body::SignIn {
            selected: method,
            waiting,
        },
        error,
        busy,
    }
}

fn sign_in_hints(waiting: &Option<Waiting>) -> Vec<KeyHint> {
    let mut hints = vec![hint("Tab", "switch method")];
    match waiting {
        None => hints.push(hint("Enter", "sign in")),
        Some(Waiting::Starting(_)) => {}
        Some(Waiting::Browser) => hints.push(hint("Enter", "restart")),
        Some(Waiting::DeviceCodeRequested) => hints.push(hint("Esc", "cancel")),
        Some(Waiting::DeviceCode(code)) => {
            if code.expired {
                hints.push(hint("Enter", "new code"));
            } else {
                hints.push(hint("o", "open link"));
            }
            hints.push(hint("Esc", "cancel"));
        }
    }
    hints.push(hint("?", "help"));
    hints.push(hint("q", "quit"));
    hints
}

/// `mm:ss`, minutes unbounded
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
