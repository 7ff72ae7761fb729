use super::IClientRepo;
use crate::repos::shared::inmemory_repo::*;
use recall_domain::{Client, ID};

pub struct InMemoryClientRepo {
    clients: std::sync::Mutex<Vec<Client>>,
}

impl InMemoryClientRepo {
    pub fn new() -> Self {
        Self {
            clients: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for InMemoryClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        insert(client, &self.clients);
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        find(client_id, &self.clients)
    }

    async fn find_many(&self, client_ids: &[ID]) -> anyhow::Result<Vec<Client>> {
        Ok(find_by(&self.clients, |c: &Client| {
            client_ids.contains(&c.id)
        }))
    }

    async fn find_all(&self) -> Vec<Client> {
        find_by(&self.clients, |_| true)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Client> {
        find_by(&self.clients, |c: &Client| c.user_id == *user_id)
    }
}
