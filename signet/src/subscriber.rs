use signet_authority::{AuthNotification, AuthorityClient, AuthorityError, Subscription};

/// Holds at most one notification registration with the authority
///
/// `subscribe` is idempotent while a registration is live; `dispose` releases
/// it, after which `next` yields nothing. Dropping the subscriber disposes it.
#[derive(Debug, Default)]
pub struct NotificationSubscriber {
    subscription: Option<Subscription>,
}

impl NotificationSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<C: AuthorityClient>(&mut self, client: &C) -> Result<(), AuthorityError> {
        if self.is_active() {
            tracing::debug!("Already subscribed to authority notifications");
            return Ok(());
        }

        self.subscription = Some(client.subscribe()?);
        tracing::info!("Subscribed to authority notifications");
        Ok(())
    }

    /// Next notification, or None when idle or disposed
    pub async fn next(&mut self) -> Option<AuthNotification> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => None,
        }
    }

    pub fn try_next(&mut self) -> Option<AuthNotification> {
        self.subscription.as_mut().and_then(Subscription::try_recv)
    }

    pub fn dispose(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            tracing::info!("Unsubscribed from authority notifications");
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| !subscription.is_closed())
    }
}

impl Drop for NotificationSubscriber {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_authority::testing::FakeAuthority;

    #[tokio::test]
    async fn test_subscribe_registers_once() {
        let authority = FakeAuthority::new();
        let mut subscriber = NotificationSubscriber::new();

        subscriber.subscribe(&authority).unwrap();
        subscriber.subscribe(&authority).unwrap();

        assert_eq!(authority.subscribe_calls(), 1);
        assert_eq!(authority.emit(AuthNotification::AuthLogout), 1);
        assert_eq!(subscriber.next().await, Some(AuthNotification::AuthLogout));
    }

    #[tokio::test]
    async fn test_dispose_stops_delivery() {
        let authority = FakeAuthority::new();
        let mut subscriber = NotificationSubscriber::new();
        subscriber.subscribe(&authority).unwrap();

        authority.emit(AuthNotification::AuthLogout);
        subscriber.dispose();
        authority.emit(AuthNotification::AuthLogout);

        assert!(!subscriber.is_active());
        assert_eq!(authority.active_subscribers(), 0);
        assert_eq!(subscriber.next().await, None);
    }

    #[tokio::test]
    async fn test_resubscribe_after_dispose() {
        let authority = FakeAuthority::new();
        let mut subscriber = NotificationSubscriber::new();

        subscriber.subscribe(&authority).unwrap();
        subscriber.dispose();
        subscriber.subscribe(&authority).unwrap();

        assert_eq!(authority.subscribe_calls(), 2);
        assert_eq!(authority.active_subscribers(), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_registration() {
        let authority = FakeAuthority::new();
        {
            let mut subscriber = NotificationSubscriber::new();
            subscriber.subscribe(&authority).unwrap();
            assert_eq!(authority.active_subscribers(), 1);
        }

        assert_eq!(authority.active_subscribers(), 0);
    }

    #[test]
    fn test_idle_subscriber_yields_nothing() {
        let mut subscriber = NotificationSubscriber::new();
        assert!(!subscriber.is_active());
        assert_eq!(subscriber.try_next(), None);
    }
}
