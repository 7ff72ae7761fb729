use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Records that a `User` has seen the overdue alert for a `FollowUp`.
/// Its existence suppresses re-surfacing that follow-up to that user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcknowledgmentRecord {
    pub id: ID,
    pub follow_up_id: ID,
    pub user_id: ID,
    pub acknowledged_at: i64,
}

impl AcknowledgmentRecord {
    pub fn new(follow_up_id: ID, user_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            follow_up_id,
            user_id,
            acknowledged_at: now,
        }
    }
}

impl Entity for AcknowledgmentRecord {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
