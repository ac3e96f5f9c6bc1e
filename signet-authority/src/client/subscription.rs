use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::common::AuthNotification;

/// A live registration for authority notifications
///
/// Notifications are queued on an unbounded channel fed either by a transport
/// listener task (HTTP) or directly by an in-process authority. Closing the
/// subscription aborts the listener, closes the channel and discards anything
/// still queued, so nothing is yielded after `close` returns. Dropping the
/// subscription closes it.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<AuthNotification>,
    listener: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthNotification>) -> Self {
        Self {
            receiver,
            listener: None,
        }
    }

    /// Subscription whose notifications are produced by a background listener task
    pub fn with_listener(
        receiver: mpsc::UnboundedReceiver<AuthNotification>,
        listener: JoinHandle<()>,
    ) -> Self {
        Self {
            receiver,
            listener: Some(listener),
        }
    }

    /// Wait for the next notification. Returns None once closed.
    pub async fn recv(&mut self) -> Option<AuthNotification> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<AuthNotification> {
        self.receiver.try_recv().ok()
    }

    pub fn close(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }

    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_close_discards_queued_notifications() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscription = Subscription::new(rx);

        tx.send(AuthNotification::AuthLogout).unwrap();
        tx.send(AuthNotification::AuthLogout).unwrap();
        assert_eq!(subscription.recv().await, Some(AuthNotification::AuthLogout));

        subscription.close();

        assert!(subscription.is_closed());
        assert!(tx.is_closed());
        assert!(tx.send(AuthNotification::AuthLogout).is_err());
        assert_eq!(subscription.recv().await, None);
    }

    #[tokio::test]
    async fn test_close_aborts_listener() {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = tokio::spawn(async move {
            loop {
                if tx.send(AuthNotification::AuthLogout).is_err() {
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        });
        let mut subscription = Subscription::with_listener(rx, listener);

        assert!(subscription.recv().await.is_some());
        subscription.close();

        assert_eq!(subscription.recv().await, None);
    }
}
