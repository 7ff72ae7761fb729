mod inmemory;
mod postgres;

pub use inmemory::InMemoryFollowUpRepo;
pub use postgres::PostgresFollowUpRepo;
use recall_domain::{FollowUp, ID};

#[async_trait::async_trait]
pub trait IFollowUpRepo: Send + Sync {
    async fn insert(&self, follow_up: &FollowUp) -> anyhow::Result<()>;
    async fn save(&self, follow_up: &FollowUp) -> anyhow::Result<()>;
    async fn find(&self, follow_up_id: &ID) -> Option<FollowUp>;
    async fn delete(&self, follow_up_id: &ID) -> Option<FollowUp>;
    /// All follow-ups ordered by due date, undated records last
    async fn find_all(&self) -> Vec<FollowUp>;
    /// Follow-ups assigned to `user_id`, ordered by due date
    async fn find_by_user(&self, user_id: &ID) -> Vec<FollowUp>;
    /// Open (non-completed) follow-ups, ordered by due date
    async fn find_open(&self) -> Vec<FollowUp>;
    /// Open follow-ups whose due time is at or before `before`, ordered
    /// by due date. Undated records are never returned.
    async fn find_due_before(&self, before: i64) -> Vec<FollowUp>;
}
