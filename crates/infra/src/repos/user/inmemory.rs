use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use recall_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        Ok(find_by(&self.users, |u: &User| user_ids.contains(&u.id)))
    }

    async fn find_all(&self) -> Vec<User> {
        find_by(&self.users, |_| true)
    }

    async fn find_admins(&self) -> Vec<User> {
        find_by(&self.users, |u: &User| u.is_admin())
    }
}
