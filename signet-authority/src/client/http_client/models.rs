use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct EventsQuery<'a> {
    pub subscriber: &'a str,
    pub after: u64,
}

/// Batch of notifications queued for a subscriber since `after`
///
/// Events stay raw so one unknown kind cannot hold back the rest of the batch.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    pub cursor: u64,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}
