use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A reminder message queued for delivery to a `User`. Rows are written
/// here by the due-soon scan and by manual reminders; advancing them past
/// `Pending` is the delivery collaborator's job, not this service's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: ID,
    pub follow_up_id: ID,
    /// Recipient
    pub user_id: ID,
    pub message: String,
    /// The `User` on whose behalf the row was written. For scan-generated
    /// rows this is the assignee itself.
    pub sent_by: ID,
    pub status: NotificationStatus,
    pub created_at: i64,
}

impl Notification {
    pub fn new(follow_up_id: ID, user_id: ID, message: String, sent_by: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            follow_up_id,
            user_id,
            message,
            sent_by,
            status: NotificationStatus::Pending,
            created_at: now,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Dismissed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Dismissed => "dismissed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "sent" => Some(Self::Sent),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }
}
