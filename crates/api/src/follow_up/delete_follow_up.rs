use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::delete_follow_up::*;
use recall_api_structs::dtos::FollowUpDTO;
use recall_domain::{User, ID};
use recall_infra::RecallContext;
use tracing::{error, info};

pub async fn delete_follow_up_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteFollowUpUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        reason: body.0.reason,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_up| HttpResponse::Ok().json(APIResponse::new(follow_up)))
        .map_err(RecallError::from)
}

/// Removes a follow-up entirely. Irreversible. The reason is demanded
/// from the caller and logged, but there is no row left to store it on.
#[derive(Debug)]
pub struct DeleteFollowUpUseCase {
    pub follow_up_id: ID,
    pub reason: String,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyReason,
    NotFound(ID),
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyReason => {
                Self::BadClientData("A reason is required to delete a follow-up".into())
            }
            UseCaseError::NotFound(follow_up_id) => Self::NotFound(format!(
                "The follow-up with id: {}, was not found.",
                follow_up_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteFollowUpUseCase {
    type Response = FollowUpDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        if self.reason.trim().is_empty() {
            return Err(UseCaseError::EmptyReason);
        }

        match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) if self.user.is_admin() || follow_up.user_id == self.user.id => (),
            _ => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        let follow_up = match ctx.repos.follow_ups.delete(&self.follow_up_id).await {
            Some(follow_up) => follow_up,
            None => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };
        info!(
            follow_up_id = %follow_up.id,
            reason = %self.reason,
            "Follow-up deleted"
        );

        let now = ctx.sys.get_timestamp_millis();
        Ok(FollowUpDTO::new(follow_up, None, None, now))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CleanupFollowUpRelations {})]
    }
}

/// Acknowledgments and notification rows for a deleted follow-up are
/// dangling, remove them. Best-effort: failures are logged, the delete
/// itself already happened.
pub struct CleanupFollowUpRelations {}

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteFollowUpUseCase> for CleanupFollowUpRelations {
    async fn notify(&self, follow_up: &FollowUpDTO, ctx: &RecallContext) {
        if let Err(e) = ctx
            .repos
            .acknowledgments
            .delete_by_follow_up(&follow_up.id)
            .await
        {
            error!(
                "Unable to delete acknowledgments of follow-up: {}. Error: {:?}",
                follow_up.id, e
            );
        }
        if let Err(e) = ctx
            .repos
            .notifications
            .delete_by_follow_up(&follow_up.id)
            .await
        {
            error!(
                "Unable to delete notifications of follow-up: {}. Error: {:?}",
                follow_up.id, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::{AcknowledgmentRecord, Notification, UserRole};

    #[actix_web::test]
    async fn deletes_the_record_and_its_relations() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now - MINUTE)).await;

        let acknowledgment =
            AcknowledgmentRecord::new(follow_up.id.clone(), member.id.clone(), now);
        ctx.repos
            .acknowledgments
            .insert(&acknowledgment)
            .await
            .unwrap();
        let notification = Notification::new(
            follow_up.id.clone(),
            member.id.clone(),
            "Follow-up with Acme Travels in 10 minutes".into(),
            member.id.clone(),
            now,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let usecase = DeleteFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "duplicate entry".into(),
            user: member.clone(),
        };
        execute(usecase, &ctx).await.expect("To delete");

        assert!(ctx.repos.follow_ups.find(&follow_up.id).await.is_none());
        assert!(ctx
            .repos
            .acknowledgments
            .find_by_follow_up_and_user(&follow_up.id, &member.id)
            .await
            .is_none());
        assert!(ctx
            .repos
            .notifications
            .find_pending_by_user(&member.id)
            .await
            .is_empty());
    }

    #[actix_web::test]
    async fn requires_a_reason() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + MINUTE)).await;

        let usecase = DeleteFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: " ".into(),
            user: member,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::EmptyReason
        );
        assert!(ctx.repos.follow_ups.find(&follow_up.id).await.is_some());
    }

    #[actix_web::test]
    async fn deleting_a_missing_follow_up_is_not_found() {
        let ctx = setup_ctx(1000 * MINUTE);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;

        let follow_up_id = ID::new();
        let usecase = DeleteFollowUpUseCase {
            follow_up_id: follow_up_id.clone(),
            reason: "cleanup".into(),
            user: member,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(follow_up_id)
        );
    }
}
