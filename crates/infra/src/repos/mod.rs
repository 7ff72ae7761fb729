mod acknowledgment;
mod client;
mod follow_up;
mod notification;
mod shared;
mod user;

use acknowledgment::{InMemoryAcknowledgmentRepo, PostgresAcknowledgmentRepo};
pub use acknowledgment::IAcknowledgmentRepo;
use client::{InMemoryClientRepo, PostgresClientRepo};
pub use client::IClientRepo;
use follow_up::{InMemoryFollowUpRepo, PostgresFollowUpRepo};
pub use follow_up::IFollowUpRepo;
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
pub use notification::INotificationRepo;
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use user::{InMemoryUserRepo, PostgresUserRepo};
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub follow_ups: Arc<dyn IFollowUpRepo>,
    pub clients: Arc<dyn IClientRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub acknowledgments: Arc<dyn IAcknowledgmentRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            follow_ups: Arc::new(PostgresFollowUpRepo::new(pool.clone())),
            clients: Arc::new(PostgresClientRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            acknowledgments: Arc::new(PostgresAcknowledgmentRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            follow_ups: Arc::new(InMemoryFollowUpRepo::new()),
            clients: Arc::new(InMemoryClientRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            acknowledgments: Arc::new(InMemoryAcknowledgmentRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
