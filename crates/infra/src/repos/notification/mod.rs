mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use recall_domain::{Notification, ID};

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Pending notifications addressed to `user_id`, newest first
    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<Notification>;
    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult>;
}
