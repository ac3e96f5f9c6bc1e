mod models;

use models::{EventsQuery, EventsResponse};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{AuthorityClient, Settings, Subscription};
use crate::common::{AuthNotification, CommandResponse, LogoutResponse, StatusResponse};
use crate::error::AuthorityError;

const RETRY_DELAY_MS: u64 = 5000; // Back off 5 seconds after a failed poll

/// Authority reached over JSON/HTTP
///
/// Commands are plain request/response calls. Notifications are pulled by a
/// background listener that long-polls `/auth/events` with a per-subscription
/// id and forwards every batch into the subscription channel.
#[derive(Debug, Clone)]
pub struct HttpAuthorityClient {
    http_client: Client,
    authority_url: String,
    poll_interval: Duration,
}

impl HttpAuthorityClient {
    pub fn new(settings: &Settings) -> Result<Self, AuthorityError> {
        let http_client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            authority_url: settings.authority_url.trim_end_matches('/').to_string(),
            poll_interval: settings.poll_interval(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.authority_url, path)
    }

    async fn post_command(&self, path: &str) -> Result<CommandResponse, AuthorityError> {
        let resp = self
            .http_client
            .post(self.url(path))
            .send()
            .await?
            .error_for_status()?
            .json::<CommandResponse>()
            .await?;

        Ok(resp)
    }
}

impl AuthorityClient for HttpAuthorityClient {
    async fn get_status(&self) -> Result<StatusResponse, AuthorityError> {
        let resp = self
            .http_client
            .get(self.url("/auth/status"))
            .send()
            .await?
            .error_for_status()?
            .json::<StatusResponse>()
            .await?;

        Ok(resp)
    }

    async fn start_browser_auth(&self) -> Result<CommandResponse, AuthorityError> {
        self.post_command("/auth/browser").await
    }

    async fn start_device_code_auth(&self) -> Result<CommandResponse, AuthorityError> {
        self.post_command("/auth/device").await
    }

    async fn logout(&self) -> Result<LogoutResponse, AuthorityError> {
        let resp = self
            .http_client
            .post(self.url("/auth/logout"))
            .send()
            .await?
            .error_for_status()?
            .json::<LogoutResponse>()
            .await?;

        Ok(resp)
    }

    fn subscribe(&self) -> Result<Subscription, AuthorityError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            AuthorityError::Unavailable(format!("No async runtime for listener: {}", e))
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber_id = Uuid::new_v4().to_string();

        tracing::info!(subscriber = %subscriber_id, "Subscribing to authority notifications");

        let listener = handle.spawn(listen(
            self.http_client.clone(),
            self.url("/auth/events"),
            subscriber_id,
            self.poll_interval,
            tx,
        ));

        Ok(Subscription::with_listener(rx, listener))
    }
}

async fn fetch_events(
    http_client: &Client,
    events_url: &str,
    subscriber_id: &str,
    cursor: u64,
) -> Result<EventsResponse, AuthorityError> {
    let resp = http_client
        .get(events_url)
        .query(&EventsQuery {
            subscriber: subscriber_id,
            after: cursor,
        })
        .send()
        .await?
        .error_for_status()?
        .json::<EventsResponse>()
        .await?;

    Ok(resp)
}

/// Poll loop feeding one subscription. Ends when the subscription is closed.
async fn listen(
    http_client: Client,
    events_url: String,
    subscriber_id: String,
    poll_interval: Duration,
    tx: mpsc::UnboundedSender<AuthNotification>,
) {
    let mut cursor = 0;

    loop {
        if tx.is_closed() {
            break;
        }

        match fetch_events(&http_client, &events_url, &subscriber_id, cursor).await {
            Ok(batch) => {
                cursor = batch.cursor;
                for event in batch.events {
                    let notification = match serde_json::from_value::<AuthNotification>(event) {
                        Ok(notification) => notification,
                        Err(e) => {
                            tracing::warn!(
                                subscriber = %subscriber_id,
                                "Skipping unrecognized notification: {}",
                                e
                            );
                            continue;
                        }
                    };
                    tracing::debug!(
                        subscriber = %subscriber_id,
                        kind = %notification.kind(),
                        "Received notification"
                    );
                    if tx.send(notification).is_err() {
                        tracing::debug!(subscriber = %subscriber_id, "Subscription closed");
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(subscriber = %subscriber_id, "Notification poll failed: {}", e);
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                continue;
            }
        }

        tokio::time::sleep(poll_interval).await;
    }
}
