use super::IFollowUpRepo;
use recall_domain::{FollowUp, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresFollowUpRepo {
    pool: PgPool,
}

impl PostgresFollowUpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FollowUpRaw {
    follow_up_uid: Uuid,
    client_uid: Uuid,
    user_uid: Uuid,
    due_at: Option<i64>,
    note: Option<String>,
    action_reason: Option<String>,
    is_completed: bool,
    created_at: i64,
}

impl Into<FollowUp> for FollowUpRaw {
    fn into(self) -> FollowUp {
        FollowUp {
            id: ID::from(self.follow_up_uid),
            client_id: ID::from(self.client_uid),
            user_id: ID::from(self.user_uid),
            due_at: self.due_at,
            note: self.note,
            action_reason: self.action_reason,
            is_completed: self.is_completed,
            created_at: self.created_at,
        }
    }
}

const FIELDS: &str =
    "follow_up_uid, client_uid, user_uid, due_at, note, action_reason, is_completed, created_at";

#[async_trait::async_trait]
impl IFollowUpRepo for PostgresFollowUpRepo {
    async fn insert(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO follow_ups
            (follow_up_uid, client_uid, user_uid, due_at, note, action_reason, is_completed, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(follow_up.id.inner_ref())
        .bind(follow_up.client_id.inner_ref())
        .bind(follow_up.user_id.inner_ref())
        .bind(follow_up.due_at)
        .bind(&follow_up.note)
        .bind(&follow_up.action_reason)
        .bind(follow_up.is_completed)
        .bind(follow_up.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE follow_ups SET
                client_uid = $2,
                user_uid = $3,
                due_at = $4,
                note = $5,
                action_reason = $6,
                is_completed = $7
            WHERE follow_up_uid = $1
            "#,
        )
        .bind(follow_up.id.inner_ref())
        .bind(follow_up.client_id.inner_ref())
        .bind(follow_up.user_id.inner_ref())
        .bind(follow_up.due_at)
        .bind(&follow_up.note)
        .bind(&follow_up.action_reason)
        .bind(follow_up.is_completed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, follow_up_id: &ID) -> Option<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "SELECT {} FROM follow_ups WHERE follow_up_uid = $1",
            FIELDS
        ))
        .bind(follow_up_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|follow_up| follow_up.into())
    }

    async fn delete(&self, follow_up_id: &ID) -> Option<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "DELETE FROM follow_ups WHERE follow_up_uid = $1 RETURNING {}",
            FIELDS
        ))
        .bind(follow_up_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|follow_up| follow_up.into())
    }

    async fn find_all(&self) -> Vec<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "SELECT {} FROM follow_ups ORDER BY due_at ASC NULLS LAST",
            FIELDS
        ))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|follow_up| follow_up.into())
        .collect()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "SELECT {} FROM follow_ups WHERE user_uid = $1 ORDER BY due_at ASC NULLS LAST",
            FIELDS
        ))
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|follow_up| follow_up.into())
        .collect()
    }

    async fn find_open(&self) -> Vec<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "SELECT {} FROM follow_ups WHERE NOT is_completed ORDER BY due_at ASC NULLS LAST",
            FIELDS
        ))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|follow_up| follow_up.into())
        .collect()
    }

    async fn find_due_before(&self, before: i64) -> Vec<FollowUp> {
        sqlx::query_as::<_, FollowUpRaw>(&format!(
            "SELECT {} FROM follow_ups WHERE NOT is_completed AND due_at <= $1 ORDER BY due_at ASC",
            FIELDS
        ))
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|follow_up| follow_up.into())
        .collect()
    }
}
