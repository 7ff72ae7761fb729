mod inmemory;
mod postgres;

pub use inmemory::InMemoryClientRepo;
pub use postgres::PostgresClientRepo;
use recall_domain::{Client, ID};

#[async_trait::async_trait]
pub trait IClientRepo: Send + Sync {
    async fn insert(&self, client: &Client) -> anyhow::Result<()>;
    async fn find(&self, client_id: &ID) -> Option<Client>;
    async fn find_many(&self, client_ids: &[ID]) -> anyhow::Result<Vec<Client>>;
    async fn find_all(&self) -> Vec<Client>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Client>;
}
