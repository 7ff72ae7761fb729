use super::INotificationRepo;
use crate::repos::shared::repo::DeleteResult;
use recall_domain::{Notification, NotificationStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    follow_up_uid: Uuid,
    user_uid: Uuid,
    message: String,
    sent_by: Uuid,
    status: String,
    created_at: i64,
}

impl Into<Notification> for NotificationRaw {
    fn into(self) -> Notification {
        Notification {
            id: ID::from(self.notification_uid),
            follow_up_id: ID::from(self.follow_up_uid),
            user_id: ID::from(self.user_uid),
            message: self.message,
            sent_by: ID::from(self.sent_by),
            status: NotificationStatus::parse(&self.status).unwrap_or(NotificationStatus::Pending),
            created_at: self.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO follow_up_notifications
            (notification_uid, follow_up_uid, user_uid, message, sent_by, status, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.follow_up_id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(&notification.message)
        .bind(notification.sent_by.inner_ref())
        .bind(notification.status.as_str())
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT notification_uid, follow_up_uid, user_uid, message, sent_by, status, created_at
            FROM follow_up_notifications
            WHERE user_uid = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|notification| notification.into())
        .collect()
    }

    async fn delete_by_follow_up(&self, follow_up_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query("DELETE FROM follow_up_notifications WHERE follow_up_uid = $1")
            .bind(follow_up_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
