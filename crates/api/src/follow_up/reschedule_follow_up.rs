use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::dtos::FollowUpDTO;
use recall_api_structs::reschedule_follow_up::*;
use recall_domain::{FollowUp, User, ID};
use recall_infra::RecallContext;

pub async fn reschedule_follow_up_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = RescheduleFollowUpUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        reason: body.reason,
        new_due_at: body.new_due_at,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_up| HttpResponse::Ok().json(APIResponse::new(follow_up)))
        .map_err(RecallError::from)
}

/// Moves a follow-up to a new future due time. Also reopens a completed
/// record, which puts it back into the reminder pipeline.
#[derive(Debug)]
pub struct RescheduleFollowUpUseCase {
    pub follow_up_id: ID,
    pub reason: String,
    pub new_due_at: i64,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyReason,
    DueDateNotFarEnoughAhead,
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyReason => {
                Self::BadClientData("A reason is required to reschedule a follow-up".into())
            }
            UseCaseError::DueDateNotFarEnoughAhead => Self::BadClientData(
                "The new due date must be at least a minute in the future".into(),
            ),
            UseCaseError::NotFound(follow_up_id) => Self::NotFound(format!(
                "The follow-up with id: {}, was not found.",
                follow_up_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RescheduleFollowUpUseCase {
    type Response = FollowUpDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "RescheduleFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        // both checks happen before anything touches the store
        if self.reason.trim().is_empty() {
            return Err(UseCaseError::EmptyReason);
        }
        let now = ctx.sys.get_timestamp_millis();
        if !FollowUp::is_schedulable_due_date(self.new_due_at, now) {
            return Err(UseCaseError::DueDateNotFarEnoughAhead);
        }

        let mut follow_up = match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) if self.user.is_admin() || follow_up.user_id == self.user.id => {
                follow_up
            }
            _ => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        follow_up.due_at = Some(self.new_due_at);
        follow_up.action_reason = Some(self.reason.clone());
        follow_up.is_completed = false;
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

    const DAY: i64 = 24 * 60 * MINUTE;

    #[actix_web::test]
    async fn moves_the_due_date_and_records_the_reason() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let original_due = now + 30 * MINUTE;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(original_due)).await;

        let usecase = RescheduleFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "client asked for more time".into(),
            new_due_at: original_due + 2 * DAY,
            user: member,
        };
        let rescheduled = execute(usecase, &ctx).await.expect("To reschedule");
        assert_eq!(rescheduled.due_at, Some(original_due + 2 * DAY));
        assert_eq!(
            rescheduled.action_reason,
            Some("client asked for more time".into())
        );
        assert!(!rescheduled.is_completed);

        let stored = ctx.repos.follow_ups.find(&follow_up.id).await.unwrap();
        assert_eq!(stored.due_at, Some(original_due + 2 * DAY));
        assert!(!stored.is_completed);
    }

    #[actix_web::test]
    async fn reopens_a_completed_follow_up() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let mut follow_up = seed_follow_up(&ctx, &client, &member, Some(now - MINUTE)).await;
        follow_up.is_completed = true;
        ctx.repos.follow_ups.save(&follow_up).await.unwrap();

        let usecase = RescheduleFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "turned out it was not done after all".into(),
            new_due_at: now + 2 * DAY,
            user: member,
        };
        let rescheduled = execute(usecase, &ctx).await.expect("To reschedule");
        assert!(!rescheduled.is_completed);
        assert_eq!(rescheduled.status, FollowUpStatus::Upcoming);
    }

    #[actix_web::test]
    async fn rejects_a_near_or_past_due_date_without_touching_the_store() {
        let now = 1000 * MINUTE;
        let mut ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;

        let calls = CountingFollowUpRepo::wrap(&mut ctx);
        for new_due_at in [now - DAY, now, now + MINUTE].iter() {
            let usecase = RescheduleFollowUpUseCase {
                follow_up_id: follow_up.id.clone(),
                reason: "pushing it".into(),
                new_due_at: *new_due_at,
                user: member.clone(),
            };
            assert_eq!(
                execute(usecase, &ctx).await.unwrap_err(),
                UseCaseError::DueDateNotFarEnoughAhead
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let stored = ctx.repos.follow_ups.find(&follow_up.id).await.unwrap();
        assert_eq!(stored.due_at, Some(now + 30 * MINUTE));
    }

    #[actix_web::test]
    async fn rejects_a_missing_reason_without_touching_the_store() {
        let now = 1000 * MINUTE;
        let mut ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let follow_up = seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;

        let calls = CountingFollowUpRepo::wrap(&mut ctx);
        let usecase = RescheduleFollowUpUseCase {
            follow_up_id: follow_up.id.clone(),
            reason: "  ".into(),
            new_due_at: now + DAY,
            user: member,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::EmptyReason
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
