use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_notifications::*;
use recall_domain::{Notification, User};
use recall_infra::RecallContext;

pub async fn get_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(RecallError::from)
}

/// The caller's pending notification rows, newest first. Delivery state
/// is owned by the delivery collaborator; this is a read-only window.
#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RecallError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx
            .repos
            .notifications
            .find_pending_by_user(&self.user.id)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::{Notification as DomainNotification, UserRole};

    #[actix_web::test]
    async fn lists_only_the_callers_pending_rows() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let other = seed_user(&ctx, "Omar", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + 10 * MINUTE)).await;

        let mine = DomainNotification::new(
            follow_up.id.clone(),
            member.id.clone(),
            "Follow-up with Acme Travels in 10 minutes".into(),
            member.id.clone(),
            now,
        );
        ctx.repos.notifications.insert(&mine).await.unwrap();
        let theirs = DomainNotification::new(
            follow_up.id.clone(),
            other.id.clone(),
            "Follow-up with Acme Travels in 10 minutes".into(),
            member.id.clone(),
            now,
        );
        ctx.repos.notifications.insert(&theirs).await.unwrap();

        let usecase = GetNotificationsUseCase { user: member };
        let notifications = execute(usecase, &ctx).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].id, mine.id);
    }
}
