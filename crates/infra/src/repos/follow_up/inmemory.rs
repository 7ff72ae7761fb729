use super::IFollowUpRepo;
use crate::repos::shared::inmemory_repo::*;
use recall_domain::{FollowUp, ID};

pub struct InMemoryFollowUpRepo {
    follow_ups: std::sync::Mutex<Vec<FollowUp>>,
}

impl InMemoryFollowUpRepo {
    pub fn new() -> Self {
        Self {
            follow_ups: std::sync::Mutex::new(vec![]),
        }
    }
}

fn sort_by_due_date(follow_ups: &mut Vec<FollowUp>) {
    follow_ups.sort_by_key(|f| f.due_at.unwrap_or(i64::MAX));
}

#[async_trait::async_trait]
impl IFollowUpRepo for InMemoryFollowUpRepo {
    async fn insert(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
        insert(follow_up, &self.follow_ups);
        Ok(())
    }

    async fn save(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
        save(follow_up, &self.follow_ups);
        Ok(())
    }

    async fn find(&self, follow_up_id: &ID) -> Option<FollowUp> {
        find(follow_up_id, &self.follow_ups)
    }

    async fn delete(&self, follow_up_id: &ID) -> Option<FollowUp> {
        delete(follow_up_id, &self.follow_ups)
    }

    async fn find_all(&self) -> Vec<FollowUp> {
        let mut follow_ups = find_by(&self.follow_ups, |_| true);
        sort_by_due_date(&mut follow_ups);
        follow_ups
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<FollowUp> {
        let mut follow_ups = find_by(&self.follow_ups, |f: &FollowUp| f.user_id == *user_id);
        sort_by_due_date(&mut follow_ups);
        follow_ups
    }

    async fn find_open(&self) -> Vec<FollowUp> {
        let mut follow_ups = find_by(&self.follow_ups, |f: &FollowUp| f.is_open());
        sort_by_due_date(&mut follow_ups);
        follow_ups
    }

    async fn find_due_before(&self, before: i64) -> Vec<FollowUp> {
        let mut follow_ups = find_by(&self.follow_ups, |f: &FollowUp| {
            f.is_open() && f.due_at.map(|due_at| due_at <= before).unwrap_or(false)
        });
        sort_by_due_date(&mut follow_ups);
        follow_ups
    }
}
