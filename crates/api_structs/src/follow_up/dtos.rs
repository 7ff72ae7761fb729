use recall_domain::{format_time_left, AcknowledgmentRecord, FollowUp, FollowUpStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpDTO {
    pub id: ID,
    pub client_id: ID,
    /// Resolved at the boundary; absent when the client is gone
    pub client_name: Option<String>,
    pub user_id: ID,
    pub assigned_to_name: Option<String>,
    pub due_at: Option<i64>,
    pub note: Option<String>,
    pub action_reason: Option<String>,
    pub is_completed: bool,
    pub status: FollowUpStatus,
    pub time_left: String,
    pub created_at: i64,
}

impl FollowUpDTO {
    pub fn new(
        follow_up: FollowUp,
        client_name: Option<String>,
        assigned_to_name: Option<String>,
        now: i64,
    ) -> Self {
        Self {
            id: follow_up.id.clone(),
            client_id: follow_up.client_id.clone(),
            client_name,
            user_id: follow_up.user_id.clone(),
            assigned_to_name,
            due_at: follow_up.due_at,
            note: follow_up.note.clone(),
            action_reason: follow_up.action_reason.clone(),
            is_completed: follow_up.is_completed,
            status: follow_up.status(now),
            time_left: format_time_left(follow_up.due_at, now),
            created_at: follow_up.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgmentDTO {
    pub id: ID,
    pub follow_up_id: ID,
    pub user_id: ID,
    pub acknowledged_at: i64,
}

impl AcknowledgmentDTO {
    pub fn new(acknowledgment: AcknowledgmentRecord) -> Self {
        Self {
            id: acknowledgment.id.clone(),
            follow_up_id: acknowledgment.follow_up_id.clone(),
            user_id: acknowledgment.user_id.clone(),
            acknowledged_at: acknowledgment.acknowledged_at,
        }
    }
}
