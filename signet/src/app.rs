use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use tokio::sync::mpsc;

use signet_authority::AuthorityClient;

use crate::app_core::AppCore;
use crate::commands::executor::Executor;
use crate::events::SessionEvent;
use crate::initiator::FlowInitiator;
use crate::input::KeyEvent;
use crate::session::SessionStore;
use crate::subscriber::NotificationSubscriber;

const TICK_MS: u64 = 100;

pub struct App<C> {
    client: Arc<C>,
    session: SessionStore,
}

impl<C: AuthorityClient> App<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
            session: SessionStore::new(),
        }
    }

    /// Use a pre-configured store, e.g. one with a success callback
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub async fn run(self) -> Result<()> {
        let App { client, session } = self;

        tracing::info!("signet starting");

        let mut terminal = init_terminal()?;

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let initiator = FlowInitiator::new(client.clone(), event_tx);
        let mut core = AppCore::with_session(Executor::new(initiator), session);

        let mut subscriber = NotificationSubscriber::new();
        if let Err(e) = subscriber.subscribe(client.as_ref()) {
            tracing::warn!("Could not subscribe to authority notifications: {}", e);
        }
        core.handler_mut().query_status();

        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
        loop {
            terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), Utc::now());
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    core.tick();
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            tracing::debug!("Key press: {:?}", key);
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(session_event) = event_rx.recv() => {
                    tracing::debug!("Received session event: {:?}", session_event);
                    core.handle_session_event(session_event);
                }
                Some(notification) = subscriber.next() => {
                    tracing::info!(kind = %notification.kind(), "Received notification");
                    core.handle_session_event(SessionEvent::Notification(notification));
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Nothing may reach the store once teardown starts
        subscriber.dispose();
        core.handler_mut().shutdown();
        drop(core);

        exit_terminal(terminal)?;

        Ok(())
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn exit_terminal(
    mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
) -> Result<(), std::io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
