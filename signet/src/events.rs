use signet_authority::{AuthNotification, StatusResponse};

use crate::session::AuthMethod;

/// Commands to execute (user actions → authority requests or local updates)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Method selection
    SelectMethod(AuthMethod),
    ToggleMethod,

    // Flows
    StartSignIn,
    AbandonDeviceFlow,
    OpenVerificationUri,
    Logout,

    // View toggles
    ToggleHelp,

    // System
    Quit,
}

/// Inputs to the session reducer: initiator outcomes, local actions and notifications
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    // Startup status query
    StatusLoaded(StatusResponse),
    StatusQueryFailed {
        error: String,
    },

    // Flow initiator
    FlowStartRequested {
        method: AuthMethod,
    },
    FlowStartAccepted {
        method: AuthMethod,
    },
    FlowStartRejected {
        method: AuthMethod,
        message: String,
    },
    FlowStartUndelivered {
        method: AuthMethod,
        error: String,
    },
    LogoutFailed {
        message: String,
    },

    // Local cancellation (authority-side flow keeps running)
    DeviceFlowAbandoned,

    // Pushed by the authority
    Notification(AuthNotification),
}

/// Side effects a command asks the executor to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartFlow(AuthMethod),
    Logout,
    OpenUri(String),
}
