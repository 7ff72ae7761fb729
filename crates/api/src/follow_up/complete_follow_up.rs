use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::complete_follow_up::*;
use recall_api_structs::dtos::FollowUpDTO;
use recall_domain::{User, ID};
use recall_infra::RecallContext;

pub async fn complete_follow_up_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = CompleteFollowUpUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        reason: body.0.reason,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_up| HttpResponse::Ok().json(APIResponse::new(follow_up)))
        .map_err(RecallError::from)
}

/// Marks a follow-up done. Terminal for the reminder pipeline, though the
/// record stays readable and a reschedule can reopen it.
#[derive(Debug)]
pub struct CompleteFollowUpUseCase {
    pub follow_up_id: ID,
    pub reason: String,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyReason,
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyReason => {
                Self::BadClientData("A reason is required to complete a follow-up".into())
            }
            UseCaseError::NotFound(follow_up_id) => Self::NotFound(format!(
                "The follow-up with id: {}, was not found.",
                follow_up_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteFollowUpUseCase {
    type Response = FollowUpDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        // validated before anything touches the store
        if self.reason.trim().is_empty() {
            return Err(UseCaseError::EmptyReason);
        }

        let mut follow_up = match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) if self.user.is_admin() || follow_up.user_id == self.user.id => {
                follow_up
            }
            _ => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        follow_up.is_completed = true;
        follow_up.action_reason = Some(self.reason.clone());
        ctx.repos
            .follow_ups
            .save(&follow_up)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let client_name = ctx
            .repos
            .clients
            .find(&follow_up.client_id)
            .await
            .map(|client| client.name);
        let now = ctx.sys.get_timestamp_millis();
        Ok(FollowUpDTO::new(
            follow_up,
            client_name,
            Some(self.user.name.clone()),
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::{FollowUpStatus, UserRole};
    use std::sync::atomic::Ordering;

    #[actix_web::test]
    async fn completes_with_a_reason() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;

        let usecase = CompleteFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "spoke on the phone".into(),
            user: member,
        };
        let completed = execute(usecase, &ctx).await.expect("To complete");
        assert!(completed.is_completed);
        assert_eq!(completed.status, FollowUpStatus::Completed);
        assert_eq!(completed.action_reason, Some("spoke on the phone".into()));

        let stored = ctx.repos.follow_ups.find(&follow_up.id).await.unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.action_reason, Some("spoke on the phone".into()));
    }

    #[actix_web::test]
    async fn rejects_whitespace_reason_without_touching_the_store() {
        let now = 1000 * MINUTE;
        let mut ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;

        let calls = CountingFollowUpRepo::wrap(&mut ctx);
        for reason in ["", "   ", "\t\n"].iter() {
            let usecase = CompleteFollowUpUseCase {
                follow_up_id: follow_up.id.clone(),
                reason: reason.to_string(),
                user: member.clone(),
            };
            assert_eq!(
                execute(usecase, &ctx).await.unwrap_err(),
                UseCaseError::EmptyReason
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let stored = ctx.repos.follow_ups.find(&follow_up.id).await.unwrap();
        assert!(!stored.is_completed);
        assert_eq!(stored.action_reason, None);
    }

    #[actix_web::test]
    async fn members_cannot_complete_other_users_follow_ups() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let owner = seed_user(&ctx, "Dana", UserRole::Member).await;
        let other = seed_user(&ctx, "Omar", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &owner).await;
        let follow_up = seed_follow_up(&ctx, &client, &owner, Some(now + 30 * MINUTE)).await;

        let usecase = CompleteFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "done".into(),
            user: other,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(follow_up.id.clone())
        );
        assert!(!ctx.repos.follow_ups.find(&follow_up.id).await.unwrap().is_completed);
    }
}
