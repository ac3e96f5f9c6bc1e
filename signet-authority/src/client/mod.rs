mod config;
mod http_client;
mod subscription;

pub use config::Settings;
pub use http_client::HttpAuthorityClient;
pub use subscription::Subscription;

use std::future::Future;

use crate::common::{CommandResponse, LogoutResponse, StatusResponse};
use crate::error::AuthorityError;

/// Boundary with the external credential authority
///
/// The authority performs every OAuth exchange and owns all token material.
/// Command results only say whether a request was accepted; outcomes arrive
/// later through [`AuthorityClient::subscribe`].
pub trait AuthorityClient: Send + Sync + 'static {
    /// One-shot status query, issued once at startup
    fn get_status(&self) -> impl Future<Output = Result<StatusResponse, AuthorityError>> + Send;

    fn start_browser_auth(
        &self,
    ) -> impl Future<Output = Result<CommandResponse, AuthorityError>> + Send;

    /// Accepting a device-code start never carries the challenge itself
    fn start_device_code_auth(
        &self,
    ) -> impl Future<Output = Result<CommandResponse, AuthorityError>> + Send;

    fn logout(&self) -> impl Future<Output = Result<LogoutResponse, AuthorityError>> + Send;

    /// Register for push notifications. Each call creates a new registration.
    fn subscribe(&self) -> Result<Subscription, AuthorityError>;
}
