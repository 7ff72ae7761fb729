use crate::error::RecallError;
use crate::shared::{
    auth::{ensure_admin, protect_route},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{TimeZone, Utc};
use recall_api_structs::dtos::NotificationDTO;
use recall_api_structs::send_follow_up_reminder::*;
use recall_domain::{Notification, User, ID};
use recall_infra::RecallContext;

pub async fn send_follow_up_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;
    ensure_admin(&user)?;

    let usecase = SendFollowUpReminderUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Created().json(APIResponse::new(notification)))
        .map_err(RecallError::from)
}

/// Manual nudge from an admin: queues a pending notification row for the
/// assignee. Independent of the due-soon scan and not deduplicated, an
/// admin can nudge as often as they like.
#[derive(Debug)]
pub struct SendFollowUpReminderUseCase {
    pub follow_up_id: ID,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(follow_up_id) => Self::NotFound(format!(
                "The follow-up with id: {}, was not found.",
                follow_up_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn format_due_time(due_at: Option<i64>) -> String {
    due_at
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendFollowUpReminderUseCase {
    type Response = NotificationDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "SendFollowUpReminder";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let follow_up = match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) => follow_up,
            None => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        let client_name = ctx
            .repos
            .clients
            .find(&follow_up.client_id)
            .await
            .map(|client| client.name)
            .unwrap_or_else(|| "Unknown".to_string());
        let message = format!(
            "Reminder: Follow-up with {} at {}",
            client_name,
            format_due_time(follow_up.due_at)
        );

        let notification = Notification::new(
            follow_up.id.clone(),
            follow_up.user_id.clone(),
            message,
            self.user.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(NotificationDTO::new(notification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::{NotificationStatus, UserRole};

    #[actix_web::test]
    async fn queues_a_pending_notification_for_the_assignee() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let admin = seed_user(&ctx, "Root", UserRole::Admin).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        // 1970-01-01 16:40 UTC
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(1000 * MINUTE)).await;

        let usecase = SendFollowUpReminderUseCase {
            follow_up_id: follow_up.id.clone(),
            user: admin.clone(),
        };
        let notification = execute(usecase, &ctx).await.expect("To send reminder");

        assert_eq!(notification.user_id, member.id);
        assert_eq!(notification.sent_by, admin.id);
        assert_eq!(notification.status, NotificationStatus::Pending);
        assert_eq!(
            notification.message,
            "Reminder: Follow-up with Acme Travels at 1970-01-01 16:40"
        );

        let pending = ctx.repos.notifications.find_pending_by_user(&member.id).await;
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn formats_missing_due_time_as_empty() {
        assert_eq!(format_due_time(None), "");
    }
}
