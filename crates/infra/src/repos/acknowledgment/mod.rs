mod inmemory;
mod postgres;

pub use inmemory::InMemoryAcknowledgmentRepo;
pub use postgres::PostgresAcknowledgmentRepo;
use recall_domain::{AcknowledgmentRecord, ID};

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IAcknowledgmentRepo: Send + Sync {
    async fn insert(&self, acknowledgment: &AcknowledgmentRecord) -> anyhow::Result<()>;
    async fn find_by_follow_up_and_user(
        &self,
        follow_up_id: &ID,
        user_id: &ID,
    ) -> Option<AcknowledgmentRecord>;
    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult>;
}
