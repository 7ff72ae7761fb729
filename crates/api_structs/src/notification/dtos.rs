use recall_domain::{Notification, NotificationStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub follow_up_id: ID,
    pub user_id: ID,
    pub message: String,
    pub sent_by: ID,
    pub status: NotificationStatus,
    pub created_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id.clone(),
            follow_up_id: notification.follow_up_id.clone(),
            user_id: notification.user_id.clone(),
            message: notification.message,
            sent_by: notification.sent_by.clone(),
            status: notification.status,
            created_at: notification.created_at,
        }
    }
}
