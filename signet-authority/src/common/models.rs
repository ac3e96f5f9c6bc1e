use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile snapshot supplied by the authority once a session is established
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Answer to the one-shot status query issued at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl StatusResponse {
    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

/// Acceptance of a flow-start command. `success` only means the flow started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl CommandResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: Option<bool>,
}

/// Push notifications emitted by the authority, in any order and any number of times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum AuthNotification {
    AuthSuccess {
        user: UserProfile,
    },
    AuthRestored {
        user: UserProfile,
    },
    AuthError {
        message: String,
    },
    AuthLogout,
    DeviceCodeRequired {
        verification_uri: String,
        user_code: String,
        expires_in_seconds: u64,
    },
    DeviceCodeExpired {
        /// Code the expiry refers to, when the authority names it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_code: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    AuthSuccess,
    AuthRestored,
    AuthError,
    AuthLogout,
    DeviceCodeRequired,
    DeviceCodeExpired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthSuccess => "auth-success",
            Self::AuthRestored => "auth-restored",
            Self::AuthError => "auth-error",
            Self::AuthLogout => "auth-logout",
            Self::DeviceCodeRequired => "device-code-required",
            Self::DeviceCodeExpired => "device-code-expired",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AuthNotification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::AuthSuccess { .. } => NotificationKind::AuthSuccess,
            Self::AuthRestored { .. } => NotificationKind::AuthRestored,
            Self::AuthError { .. } => NotificationKind::AuthError,
            Self::AuthLogout => NotificationKind::AuthLogout,
            Self::DeviceCodeRequired { .. } => NotificationKind::DeviceCodeRequired,
            Self::DeviceCodeExpired { .. } => NotificationKind::DeviceCodeExpired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_code_required_from_authority_payload() {
        let json = r#"{
            "event": "device-code-required",
            "verificationUri": "https://x/activate",
            "userCode": "ABCD-1234",
            "expiresInSeconds": 600
        }"#;

        let notification: AuthNotification = serde_json::from_str(json).unwrap();
        assert_eq!(
            notification,
            AuthNotification::DeviceCodeRequired {
                verification_uri: "https://x/activate".to_string(),
                user_code: "ABCD-1234".to_string(),
                expires_in_seconds: 600,
            }
        );
        assert_eq!(notification.kind(), NotificationKind::DeviceCodeRequired);
    }

    #[test]
    fn test_auth_success_with_minimal_profile() {
        let json = r#"{"event":"auth-success","user":{"id":"u1","displayName":"Ann"}}"#;

        let notification: AuthNotification = serde_json::from_str(json).unwrap();
        let AuthNotification::AuthSuccess { user } = notification else {
            panic!("Expected auth-success");
        };
        assert_eq!(user.id, "u1");
        assert_eq!(user.display_name, "Ann");
        assert_eq!(user.email, None);
        assert_eq!(user.avatar_url, None);
    }

    #[test]
    fn test_unit_and_optional_payloads() {
        let logout: AuthNotification = serde_json::from_str(r#"{"event":"auth-logout"}"#).unwrap();
        assert_eq!(logout, AuthNotification::AuthLogout);

        let expired: AuthNotification =
            serde_json::from_str(r#"{"event":"device-code-expired"}"#).unwrap();
        assert_eq!(expired, AuthNotification::DeviceCodeExpired { user_code: None });

        let named: AuthNotification =
            serde_json::from_str(r#"{"event":"device-code-expired","userCode":"WXYZ-0000"}"#)
                .unwrap();
        assert_eq!(
            named,
            AuthNotification::DeviceCodeExpired {
                user_code: Some("WXYZ-0000".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = serde_json::from_str::<AuthNotification>(r#"{"event":"token-rotated"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_and_logout_responses_tolerate_missing_fields() {
        let accepted: CommandResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(accepted, CommandResponse::accepted());

        let rejected: CommandResponse =
            serde_json::from_str(r#"{"success":false,"message":"popup blocked"}"#).unwrap();
        assert_eq!(rejected, CommandResponse::rejected("popup blocked"));

        let logout: LogoutResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(logout.success, None);
    }

    #[test]
    fn test_status_without_user() {
        let status: StatusResponse = serde_json::from_str(r#"{"authenticated":false}"#).unwrap();
        assert_eq!(status, StatusResponse::signed_out());
    }
}
