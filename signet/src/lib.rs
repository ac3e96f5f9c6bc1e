mod app;
pub mod app_core;
pub mod background;
pub mod commands;
pub mod events;
pub mod initiator;
pub mod input;
pub mod logging;
pub mod session;
pub mod state;
pub mod subscriber;
pub mod ui;
pub mod view;

pub use app::App;
pub use initiator::FlowInitiator;
pub use session::{SessionState, SessionStatus, SessionStore};
pub use subscriber::NotificationSubscriber;

// Always expose testing module (integration tests need it)
pub mod testing;
