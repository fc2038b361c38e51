use crate::domain::MemberId;
use serde::{Deserialize, Serialize};

/// A request to push a notification to a single member.
///
/// Every field is optional and nothing is validated here; deciding
/// whether a request is complete enough to send belongs to
/// [`PrepareFlow`](crate::flow::PrepareFlow). Once built, a request is
/// never modified.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(default)]
    target_member_id: Option<MemberId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

impl NotificationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> NotificationRequestBuilder {
        NotificationRequestBuilder::default()
    }

    pub fn target_member_id(&self) -> Option<MemberId> {
        self.target_member_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn into_parts(self) -> (Option<MemberId>, Option<String>, Option<String>) {
        let Self {
            target_member_id,
            title,
            body,
        } = self;

        (target_member_id, title, body)
    }
}

#[derive(Debug, Default, Clone)]
#[must_use]
pub struct NotificationRequestBuilder {
    target_member_id: Option<MemberId>,
    title: Option<String>,
    body: Option<String>,
}

impl NotificationRequestBuilder {
    pub fn target_member_id(mut self, id: impl Into<MemberId>) -> Self {
        self.target_member_id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> NotificationRequest {
        let Self {
            target_member_id,
            title,
            body,
        } = self;

        NotificationRequest {
            target_member_id,
            title,
            body,
        }
    }
}
