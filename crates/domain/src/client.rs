use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A business contact that follow-ups are scheduled against. Display
/// names on follow-up rows are resolved from here at the boundary and
/// never assumed present on the follow-up itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ID,
    pub name: String,
    /// The `User` who owns the relationship with this client
    pub user_id: ID,
    pub created_at: i64,
}

impl Client {
    pub fn new(name: String, user_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            user_id,
            created_at: now,
        }
    }
}

impl Entity for Client {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
