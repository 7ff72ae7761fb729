mod acknowledgment;
mod client;
mod follow_up;
mod notification;
mod reminder;
mod shared;
mod user;

pub use acknowledgment::AcknowledgmentRecord;
pub use client::Client;
pub use follow_up::{classify, format_time_left, FollowUp, FollowUpStatus};
pub use notification::{Notification, NotificationStatus};
pub use reminder::{due_in_minutes, threshold_hit, DueSoonKey, DEFAULT_DUE_SOON_THRESHOLDS};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{User, UserRole};
