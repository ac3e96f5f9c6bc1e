pub mod reducer;
mod store;

pub use store::SessionStore;

use chrono::{DateTime, Utc};
pub use signet_authority::UserProfile;

/// Message shown when the authority reports the device code expired
pub const CHALLENGE_EXPIRED_MESSAGE: &str = "Device code expired. Start again to get a new code.";

/// Which sign-in flow the user intends to run next. UI preference only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    #[default]
    Browser,
    Device,
}

impl AuthMethod {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Browser => Self::Device,
            Self::Device => Self::Browser,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Browser => "Browser",
            Self::Device => "Device code",
        }
    }
}

/// Code the user enters on another device, as received from the authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCodeChallenge {
    pub verification_uri: String,
    pub user_code: String,
    pub expires_in_seconds: u64,
    /// Assigned by the client on receipt
    pub issued_at: DateTime<Utc>,
}

impl DeviceCodeChallenge {
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = now.signed_duration_since(self.issued_at).num_seconds().max(0);
        self.expires_in_seconds.saturating_sub(elapsed as u64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
    /// The status query at startup failed; logged, never surfaced
    StatusQueryFailed,
    /// The authority refused to start a flow
    FlowStartRejected,
    /// The authority reported a failure mid-flow
    FlowFailed,
    /// The pending device code expired
    ChallengeExpired,
    /// A command could not be delivered to the authority
    CommandTransportFailure,
    LogoutFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub kind: FlowErrorKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl FlowError {
    pub fn new(kind: FlowErrorKind, message: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: message.into(),
            occurred_at,
        }
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    /// Waiting for the startup status query
    #[default]
    Initializing,
    Unauthenticated,
    BrowserPending,
    /// Device flow accepted; the challenge arrives separately and may not be here yet
    DevicePending {
        challenge: Option<DeviceCodeChallenge>,
    },
    Authenticated {
        user: UserProfile,
    },
}

/// Snapshot consumed by the hosting application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
    pub loading: bool,
}

/// Everything the session core tracks. Replaced as a whole on each transition.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub phase: AuthPhase,
    pub error: Option<FlowError>,
    /// Start request sent to the authority and not yet answered
    pub starting: Option<AuthMethod>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same in-flight request, new phase and error
    pub fn with(&self, phase: AuthPhase, error: Option<FlowError>) -> SessionState {
        SessionState {
            phase,
            error,
            starting: self.starting,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match &self.phase {
            AuthPhase::Initializing => SessionStatus {
                authenticated: false,
                user: None,
                loading: true,
            },
            AuthPhase::Authenticated { user } => SessionStatus {
                authenticated: true,
                user: Some(user.clone()),
                loading: false,
            },
            _ => SessionStatus {
                authenticated: false,
                user: None,
                loading: false,
            },
        }
    }

    pub fn challenge(&self) -> Option<&DeviceCodeChallenge> {
        match &self.phase {
            AuthPhase::DevicePending { challenge } => challenge.as_ref(),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.phase {
            AuthPhase::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, AuthPhase::Authenticated { .. })
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self.phase, AuthPhase::Initializing)
    }

    pub fn request_in_flight(&self) -> bool {
        self.starting.is_some()
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self.phase,
            AuthPhase::BrowserPending | AuthPhase::DevicePending { .. }
        )
    }
}
