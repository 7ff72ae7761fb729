use super::IAcknowledgmentRepo;
use crate::repos::shared::repo::DeleteResult;
use recall_domain::{AcknowledgmentRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAcknowledgmentRepo {
    pool: PgPool,
}

impl PostgresAcknowledgmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AcknowledgmentRaw {
    acknowledgment_uid: Uuid,
    follow_up_uid: Uuid,
    user_uid: Uuid,
    acknowledged_at: i64,
}

impl Into<AcknowledgmentRecord> for AcknowledgmentRaw {
    fn into(self) -> AcknowledgmentRecord {
        AcknowledgmentRecord {
            id: ID::from(self.acknowledgment_uid),
            follow_up_id: ID::from(self.follow_up_uid),
            user_id: ID::from(self.user_uid),
            acknowledged_at: self.acknowledged_at,
        }
    }
}

#[async_trait::async_trait]
impl IAcknowledgmentRepo for PostgresAcknowledgmentRepo {
    async fn insert(&self, acknowledgment: &AcknowledgmentRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO follow_up_acknowledgments
            (acknowledgment_uid, follow_up_uid, user_uid, acknowledged_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(acknowledgment.id.inner_ref())
        .bind(acknowledgment.follow_up_id.inner_ref())
        .bind(acknowledgment.user_id.inner_ref())
        .bind(acknowledgment.acknowledged_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_follow_up_and_user(
        &self,
        follow_up_id: &ID,
        user_id: &ID,
    ) -> Option<AcknowledgmentRecord> {
        sqlx::query_as::<_, AcknowledgmentRaw>(
            r#"
            SELECT acknowledgment_uid, follow_up_uid, user_uid, acknowledged_at
            FROM follow_up_acknowledgments
            WHERE follow_up_uid = $1 AND user_uid = $2
            "#,
        )
        .bind(follow_up_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|acknowledgment| acknowledgment.into())
    }

    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            "DELETE FROM follow_up_acknowledgments WHERE follow_up_uid = $1",
        )
        .bind(follow_up_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
