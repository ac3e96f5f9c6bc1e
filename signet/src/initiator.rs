use std::sync::Arc;
use tokio::sync::mpsc;

use signet_authority::AuthorityClient;

use crate::background::BackgroundTaskManager;
use crate::events::SessionEvent;
use crate::session::AuthMethod;

const STATUS_TASK: &str = "status_query";
const START_TASK: &str = "start_flow";
const LOGOUT_TASK: &str = "logout";

/// Issues user-triggered commands to the authority
///
/// Each call resolves once the authority has accepted or refused the request
/// and is translated into a [`SessionEvent`]. Outcomes of accepted flows are
/// never awaited here; they arrive as notifications.
#[derive(Debug)]
pub struct FlowInitiator<C> {
    client: Arc<C>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl<C> Clone for FlowInitiator<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            events: self.events.clone(),
        }
    }
}

impl<C: AuthorityClient> FlowInitiator<C> {
    pub fn new(client: Arc<C>, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { client, events }
    }

    pub async fn query_status(&self) -> SessionEvent {
        match self.client.get_status().await {
            Ok(status) => SessionEvent::StatusLoaded(status),
            Err(e) => SessionEvent::StatusQueryFailed {
                error: e.to_string(),
            },
        }
    }

    pub async fn start_browser_flow(&self) -> SessionEvent {
        self.start_flow(AuthMethod::Browser).await
    }

    pub async fn start_device_flow(&self) -> SessionEvent {
        self.start_flow(AuthMethod::Device).await
    }

    pub async fn start_flow(&self, method: AuthMethod) -> SessionEvent {
        let result = match method {
            AuthMethod::Browser => self.client.start_browser_auth().await,
            AuthMethod::Device => self.client.start_device_code_auth().await,
        };

        match result {
            Ok(resp) if resp.success => SessionEvent::FlowStartAccepted { method },
            Ok(resp) => SessionEvent::FlowStartRejected {
                method,
                message: resp
                    .message
                    .unwrap_or_else(|| "Sign-in could not be started".to_string()),
            },
            Err(e) => SessionEvent::FlowStartUndelivered {
                method,
                error: e.to_string(),
            },
        }
    }

    /// Only failures produce an event; success waits for the `auth-logout` notification
    pub async fn logout(&self) -> Option<SessionEvent> {
        match self.client.logout().await {
            Ok(resp) if resp.success == Some(false) => Some(SessionEvent::LogoutFailed {
                message: "The authority could not end the session".to_string(),
            }),
            Ok(_) => {
                tracing::info!("Sign out requested, waiting for confirmation");
                None
            }
            Err(e) => Some(SessionEvent::LogoutFailed {
                message: e.to_string(),
            }),
        }
    }

    pub fn spawn_status_query(&self, task_manager: &mut BackgroundTaskManager) {
        let initiator = self.clone();
        task_manager.spawn_task(STATUS_TASK, async move {
            let event = initiator.query_status().await;
            initiator.send(event);
        });
    }

    pub fn spawn_start_flow(&self, method: AuthMethod, task_manager: &mut BackgroundTaskManager) {
        let initiator = self.clone();
        task_manager.spawn_task(START_TASK, async move {
            let event = initiator.start_flow(method).await;
            initiator.send(event);
        });
    }

    pub fn spawn_logout(&self, task_manager: &mut BackgroundTaskManager) {
        let initiator = self.clone();
        task_manager.spawn_task(LOGOUT_TASK, async move {
            if let Some(event) = initiator.logout().await {
                initiator.send(event);
            }
        });
    }

    fn send(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("Event loop gone, dropping initiator result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_authority::testing::{AuthorityRequest, FakeAuthority};
    use signet_authority::{CommandResponse, LogoutResponse, StatusResponse};

    fn initiator(authority: FakeAuthority) -> FlowInitiator<FakeAuthority> {
        let (tx, _rx) = mpsc::unbounded_channel();
        FlowInitiator::new(Arc::new(authority), tx)
    }

    #[tokio::test]
    async fn test_accepted_start() {
        let authority = FakeAuthority::new();
        let event = initiator(authority.clone()).start_device_flow().await;

        assert_eq!(
            event,
            SessionEvent::FlowStartAccepted {
                method: AuthMethod::Device
            }
        );
        assert_eq!(
            authority.requests(),
            vec![AuthorityRequest::StartDeviceCodeAuth]
        );
    }

    #[tokio::test]
    async fn test_rejected_start_carries_message() {
        let authority =
            FakeAuthority::new().respond_browser(CommandResponse::rejected("popup blocked"));

        let event = initiator(authority).start_browser_flow().await;

        assert_eq!(
            event,
            SessionEvent::FlowStartRejected {
                method: AuthMethod::Browser,
                message: "popup blocked".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_start_without_message() {
        let authority = FakeAuthority::new().respond_device(CommandResponse {
            success: false,
            message: None,
        });

        let event = initiator(authority).start_device_flow().await;

        assert!(matches!(
            event,
            SessionEvent::FlowStartRejected { method: AuthMethod::Device, message }
                if message == "Sign-in could not be started"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_on_start() {
        let authority = FakeAuthority::new().fail_browser("connection refused");

        let event = initiator(authority).start_browser_flow().await;

        assert!(matches!(
            event,
            SessionEvent::FlowStartUndelivered { method: AuthMethod::Browser, error }
                if error.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn test_status_query_outcomes() {
        let signed_out = initiator(FakeAuthority::new()).query_status().await;
        assert_eq!(
            signed_out,
            SessionEvent::StatusLoaded(StatusResponse::signed_out())
        );

        let failed = initiator(FakeAuthority::new().fail_status("not running"))
            .query_status()
            .await;
        assert!(matches!(failed, SessionEvent::StatusQueryFailed { .. }));
    }

    #[tokio::test]
    async fn test_logout_outcomes() {
        assert_eq!(initiator(FakeAuthority::new()).logout().await, None);

        let unspecified = FakeAuthority::new().respond_logout(LogoutResponse { success: None });
        assert_eq!(initiator(unspecified).logout().await, None);

        let refused = FakeAuthority::new().respond_logout(LogoutResponse {
            success: Some(false),
        });
        assert!(matches!(
            initiator(refused).logout().await,
            Some(SessionEvent::LogoutFailed { .. })
        ));

        let unreachable = FakeAuthority::new().fail_logout("timed out");
        assert!(matches!(
            initiator(unreachable).logout().await,
            Some(SessionEvent::LogoutFailed { message }) if message.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_spawned_start_reports_through_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let initiator = FlowInitiator::new(Arc::new(FakeAuthority::new()), tx);
        let mut task_manager = BackgroundTaskManager::new();

        initiator.spawn_start_flow(AuthMethod::Browser, &mut task_manager);

        assert_eq!(
            rx.recv().await,
            Some(SessionEvent::FlowStartAccepted {
                method: AuthMethod::Browser
            })
        );
    }
}
