use super::IAcknowledgmentRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use recall_domain::{AcknowledgmentRecord, ID};

pub struct InMemoryAcknowledgmentRepo {
    acknowledgments: std::sync::Mutex<Vec<AcknowledgmentRecord>>,
}

impl InMemoryAcknowledgmentRepo {
    pub fn new() -> Self {
        Self {
            acknowledgments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAcknowledgmentRepo for InMemoryAcknowledgmentRepo {
    async fn insert(&self, acknowledgment: &AcknowledgmentRecord) -> anyhow::Result<()> {
        insert(acknowledgment, &self.acknowledgments);
        Ok(())
    }

    async fn find_by_follow_up_and_user(
        &self,
        follow_up_id: &ID,
        user_id: &ID,
    ) -> Option<AcknowledgmentRecord> {
        let mut found = find_by(&self.acknowledgments, |a: &AcknowledgmentRecord| {
            a.follow_up_id == *follow_up_id && a.user_id == *user_id
        });
        if found.is_empty() {
            return None;
        }
        Some(found.remove(0))
    }

    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.acknowledgments, |a: &AcknowledgmentRecord| {
            a.follow_up_id == *follow_up_id
        }))
    }
}
