use serde::{Deserialize, Serialize};

pub use crate::request::{NotificationRequest, NotificationRequestBuilder};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub i64);

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A request with every field resolved, ready to hand to whatever
/// delivers push notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingNotification {
    #[serde(rename = "targetMemberId")]
    pub target: MemberId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RelaySummary {
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
}
