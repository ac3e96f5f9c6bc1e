mod models;

pub use models::{
    AuthNotification, CommandResponse, LogoutResponse, NotificationKind, StatusResponse,
    UserProfile,
};
