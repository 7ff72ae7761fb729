use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A `FollowUp` is a scheduled obligation to contact a `Client` before a
/// due time. It stays in the reminder pipeline until it is completed or
/// deleted; rescheduling moves it back into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: ID,
    /// The `Client` to be contacted
    pub client_id: ID,
    /// The `User` responsible for the contact
    pub user_id: ID,
    /// Due time in unix millis. Optional: a record can exist without a
    /// date and is then treated as upcoming with no date set.
    pub due_at: Option<i64>,
    pub note: Option<String>,
    /// Free-text justification recorded when the follow-up was completed
    /// or rescheduled. Supersedes `note` for display once present.
    pub action_reason: Option<String>,
    pub is_completed: bool,
    pub created_at: i64,
}

impl FollowUp {
    /// A due time must be at least this far ahead of the clock when a
    /// follow-up is created or rescheduled.
    pub const MIN_SCHEDULE_AHEAD_MILLIS: i64 = 60 * 1000;

    pub fn new(client_id: ID, user_id: ID, due_at: i64, note: Option<String>, now: i64) -> Self {
        Self {
            id: Default::default(),
            client_id,
            user_id,
            due_at: Some(due_at),
            note,
            action_reason: None,
            is_completed: false,
            created_at: now,
        }
    }

    pub fn status(&self, now: i64) -> FollowUpStatus {
        classify(self.due_at, self.is_completed, now)
    }

    /// The note shown to users: the latest action reason wins over the
    /// original note.
    pub fn display_note(&self) -> Option<&str> {
        self.action_reason
            .as_deref()
            .or_else(|| self.note.as_deref())
    }

    pub fn is_open(&self) -> bool {
        !self.is_completed
    }

    /// Overdue means the due time has been reached and the follow-up is
    /// still open. Undated records are never overdue.
    pub fn is_overdue(&self, now: i64) -> bool {
        match self.due_at {
            Some(due_at) => self.is_open() && due_at <= now,
            None => false,
        }
    }

    /// Whether `due_at` is acceptable for creating or rescheduling at `now`.
    pub fn is_schedulable_due_date(due_at: i64, now: i64) -> bool {
        due_at > now + Self::MIN_SCHEDULE_AHEAD_MILLIS
    }
}

impl Entity for FollowUp {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Display status of a `FollowUp`. Derived from the completion flag and
/// the due time, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUpStatus {
    Upcoming,
    Completed,
    Expired,
}

impl Display for FollowUpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Expired => "Expired",
        };
        write!(f, "{}", s)
    }
}

/// Derives the display status of a follow-up. Total: a missing due time
/// degrades to `Upcoming` rather than erroring.
///
/// Priority order: completed wins, then an elapsed due time, then upcoming.
pub fn classify(due_at: Option<i64>, is_completed: bool, now: i64) -> FollowUpStatus {
    if is_completed {
        return FollowUpStatus::Completed;
    }
    match due_at {
        Some(due_at) if due_at < now => FollowUpStatus::Expired,
        _ => FollowUpStatus::Upcoming,
    }
}

/// Coarse human string for the time remaining until `due_at`: minutes under
/// an hour, hours under a day, days otherwise, always floor-rounded. A due
/// time in the past clamps to `0m left`, it is never negative.
pub fn format_time_left(due_at: Option<i64>, now: i64) -> String {
    let due_at = match due_at {
        Some(due_at) => due_at,
        None => return "No date set".to_string(),
    };

    let diff_millis = due_at - now;
    if diff_millis <= 0 {
        return "0m left".to_string();
    }

    let diff_minutes = diff_millis / 60_000;
    if diff_minutes < 60 {
        return format!("{}m left", diff_minutes);
    }
    let hours = diff_minutes / 60;
    if hours < 24 {
        return format!("{}h left", hours);
    }
    let days = hours / 24;
    format!("{}d left", days)
}
