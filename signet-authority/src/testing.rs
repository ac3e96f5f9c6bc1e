use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

use crate::client::{AuthorityClient, Subscription};
use crate::common::{AuthNotification, CommandResponse, LogoutResponse, StatusResponse};
use crate::error::AuthorityError;

/// A request received by [`FakeAuthority`], recorded in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityRequest {
    GetStatus,
    StartBrowserAuth,
    StartDeviceCodeAuth,
    Logout,
}

/// Scripted answer for a command: a response, or a transport failure
#[derive(Debug, Clone)]
enum Reply<T> {
    Respond(T),
    Fail(String),
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T, AuthorityError> {
        match self {
            Reply::Respond(value) => Ok(value.clone()),
            Reply::Fail(message) => Err(AuthorityError::Unavailable(message.clone())),
        }
    }
}

#[derive(Debug)]
struct FakeState {
    status: Reply<StatusResponse>,
    browser: Reply<CommandResponse>,
    device: Reply<CommandResponse>,
    logout: Reply<LogoutResponse>,
    confirm_logout: bool,
    requests: Vec<AuthorityRequest>,
    subscribers: Vec<mpsc::UnboundedSender<AuthNotification>>,
    subscribe_calls: usize,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            status: Reply::Respond(StatusResponse::signed_out()),
            browser: Reply::Respond(CommandResponse::accepted()),
            device: Reply::Respond(CommandResponse::accepted()),
            logout: Reply::Respond(LogoutResponse {
                success: Some(true),
            }),
            confirm_logout: false,
            requests: Vec::new(),
            subscribers: Vec::new(),
            subscribe_calls: 0,
        }
    }
}

/// In-process credential authority for tests
///
/// Commands answer with scripted replies (accepting everything by default) and
/// notifications are pushed with [`FakeAuthority::emit`]. Clones share state, so
/// a test can keep one handle while the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeAuthority {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_status(self, status: StatusResponse) -> Self {
        self.state().status = Reply::Respond(status);
        self
    }

    pub fn fail_status(self, message: &str) -> Self {
        self.state().status = Reply::Fail(message.to_string());
        self
    }

    pub fn respond_browser(self, response: CommandResponse) -> Self {
        self.state().browser = Reply::Respond(response);
        self
    }

    pub fn fail_browser(self, message: &str) -> Self {
        self.state().browser = Reply::Fail(message.to_string());
        self
    }

    pub fn respond_device(self, response: CommandResponse) -> Self {
        self.state().device = Reply::Respond(response);
        self
    }

    pub fn fail_device(self, message: &str) -> Self {
        self.state().device = Reply::Fail(message.to_string());
        self
    }

    pub fn respond_logout(self, response: LogoutResponse) -> Self {
        self.state().logout = Reply::Respond(response);
        self
    }

    pub fn fail_logout(self, message: &str) -> Self {
        self.state().logout = Reply::Fail(message.to_string());
        self
    }

    /// Emit `auth-logout` to subscribers after every successful logout command
    pub fn confirm_logout(self, confirm: bool) -> Self {
        self.state().confirm_logout = confirm;
        self
    }

    /// Push a notification to every open subscription, returning how many received it
    pub fn emit(&self, notification: AuthNotification) -> usize {
        let mut state = self.state();
        state
            .subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());
        state.subscribers.len()
    }

    pub fn requests(&self) -> Vec<AuthorityRequest> {
        self.state().requests.clone()
    }

    /// Subscriptions that have not been closed
    pub fn active_subscribers(&self) -> usize {
        self.state()
            .subscribers
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.state().subscribe_calls
    }

    fn record(&self, request: AuthorityRequest) {
        self.state().requests.push(request);
    }

    fn answer_status(&self) -> Result<StatusResponse, AuthorityError> {
        self.record(AuthorityRequest::GetStatus);
        self.state().status.resolve()
    }

    fn answer_browser(&self) -> Result<CommandResponse, AuthorityError> {
        self.record(AuthorityRequest::StartBrowserAuth);
        self.state().browser.resolve()
    }

    fn answer_device(&self) -> Result<CommandResponse, AuthorityError> {
        self.record(AuthorityRequest::StartDeviceCodeAuth);
        self.state().device.resolve()
    }

    fn answer_logout(&self) -> Result<LogoutResponse, AuthorityError> {
        self.record(AuthorityRequest::Logout);
        let (result, confirm) = {
            let state = self.state();
            (state.logout.resolve(), state.confirm_logout)
        };

        if confirm && matches!(&result, Ok(resp) if resp.success != Some(false)) {
            self.emit(AuthNotification::AuthLogout);
        }
        result
    }
}

impl AuthorityClient for FakeAuthority {
    async fn get_status(&self) -> Result<StatusResponse, AuthorityError> {
        self.answer_status()
    }

    async fn start_browser_auth(&self) -> Result<CommandResponse, AuthorityError> {
        self.answer_browser()
    }

    async fn start_device_code_auth(&self) -> Result<CommandResponse, AuthorityError> {
        self.answer_device()
    }

    async fn logout(&self) -> Result<LogoutResponse, AuthorityError> {
        self.answer_logout()
    }

    fn subscribe(&self) -> Result<Subscription, AuthorityError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state();
        state.subscribe_calls += 1;
        state.subscribers.push(tx);
        Ok(Subscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests_and_scripted_replies() {
        let authority = FakeAuthority::new()
            .respond_browser(CommandResponse::rejected("popup blocked"))
            .fail_device("connection refused");

        let browser = authority.start_browser_auth().await.unwrap();
        let device = authority.start_device_code_auth().await;

        assert_eq!(browser, CommandResponse::rejected("popup blocked"));
        assert!(matches!(device, Err(AuthorityError::Unavailable(_))));
        assert_eq!(
            authority.requests(),
            vec![
                AuthorityRequest::StartBrowserAuth,
                AuthorityRequest::StartDeviceCodeAuth
            ]
        );
    }

    #[tokio::test]
    async fn test_emit_skips_closed_subscriptions() {
        let authority = FakeAuthority::new();
        let mut open = authority.subscribe().unwrap();
        let mut closed = authority.subscribe().unwrap();
        closed.close();

        assert_eq!(authority.active_subscribers(), 1);
        assert_eq!(authority.emit(AuthNotification::AuthLogout), 1);
        assert_eq!(open.try_recv(), Some(AuthNotification::AuthLogout));
        assert_eq!(authority.subscribe_calls(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_logout_notifies_subscribers() {
        let authority = FakeAuthority::new().confirm_logout(true);
        let mut subscription = authority.subscribe().unwrap();

        let resp = authority.logout().await.unwrap();

        assert_eq!(resp.success, Some(true));
        assert_eq!(subscription.try_recv(), Some(AuthNotification::AuthLogout));
    }
}
