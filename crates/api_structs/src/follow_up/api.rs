use crate::dtos::{AcknowledgmentDTO, FollowUpDTO, NotificationDTO};
use recall_domain::{FollowUpStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpResponse {
    pub follow_up: FollowUpDTO,
}

impl FollowUpResponse {
    pub fn new(follow_up: FollowUpDTO) -> Self {
        Self { follow_up }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpsResponse {
    pub follow_ups: Vec<FollowUpDTO>,
}

impl FollowUpsResponse {
    pub fn new(follow_ups: Vec<FollowUpDTO>) -> Self {
        Self { follow_ups }
    }
}

pub mod create_follow_up {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub client_id: ID,
        /// Defaults to the calling user; only admins may assign others
        pub user_id: Option<ID>,
        pub due_at: i64,
        pub note: Option<String>,
    }

    pub type APIResponse = FollowUpResponse;
}

pub mod get_follow_up {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    pub type APIResponse = FollowUpResponse;
}

pub mod get_follow_ups {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub status: Option<FollowUpStatus>,
        pub client_id: Option<ID>,
    }

    pub type APIResponse = FollowUpsResponse;
}

pub mod get_upcoming_follow_ups {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub limit: Option<usize>,
    }

    pub type APIResponse = FollowUpsResponse;
}

pub mod get_unacknowledged_follow_ups {
    use super::*;

    pub type APIResponse = FollowUpsResponse;
}

pub mod get_follow_up_stats {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub completed: usize,
        pub missed: usize,
        pub rescheduled: usize,
    }
}

pub mod complete_follow_up {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reason: String,
    }

    pub type APIResponse = FollowUpResponse;
}

pub mod reschedule_follow_up {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reason: String,
        pub new_due_at: i64,
    }

    pub type APIResponse = FollowUpResponse;
}

pub mod delete_follow_up {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reason: String,
    }

    pub type APIResponse = FollowUpResponse;
}

pub mod acknowledge_follow_up {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub acknowledgment: AcknowledgmentDTO,
    }

    impl APIResponse {
        pub fn new(acknowledgment: AcknowledgmentDTO) -> Self {
            Self { acknowledgment }
        }
    }
}

pub mod send_follow_up_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub follow_up_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: NotificationDTO,
    }

    impl APIResponse {
        pub fn new(notification: NotificationDTO) -> Self {
            Self { notification }
        }
    }
}
