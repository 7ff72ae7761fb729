use super::INotificationRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use recall_domain::{Notification, NotificationStatus, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<Notification> {
        let mut notifications = find_by(&self.notifications, |n: &Notification| {
            n.user_id == *user_id && n.status == NotificationStatus::Pending
        });
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        notifications
    }

    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.notifications, |n: &Notification| {
            n.follow_up_id == *follow_up_id
        }))
    }
}
