// Wire types shared with the authority
pub mod common;

// Client side of the authority boundary
mod client;
mod error;

pub use client::{AuthorityClient, HttpAuthorityClient, Settings, Subscription};
pub use common::{
    AuthNotification, CommandResponse, LogoutResponse, NotificationKind, StatusResponse,
    UserProfile,
};
pub use error::AuthorityError;

// In-memory authority (always exposed, dependent crates test against it)
pub mod testing;
