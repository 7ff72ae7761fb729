use crate::dtos::NotificationDTO;
use recall_domain::Notification;
use serde::{Deserialize, Serialize};

pub mod get_notifications {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
            }
        }
    }
}
