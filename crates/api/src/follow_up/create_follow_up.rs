use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::create_follow_up::*;
use recall_api_structs::dtos::FollowUpDTO;
use recall_domain::{FollowUp, User, ID};
use recall_infra::RecallContext;

pub async fn create_follow_up_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateFollowUpUseCase {
        client_id: body.client_id,
        assigned_to: body.user_id,
        due_at: body.due_at,
        note: body.note,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_up| HttpResponse::Created().json(APIResponse::new(follow_up)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct CreateFollowUpUseCase {
    pub client_id: ID,
    pub assigned_to: Option<ID>,
    pub due_at: i64,
    pub note: Option<String>,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    DueDateNotFarEnoughAhead,
    NotPermittedToAssign,
    ClientNotFound(ID),
    AssigneeNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::DueDateNotFarEnoughAhead => Self::BadClientData(
                "The due date must be at least a minute in the future".into(),
            ),
            UseCaseError::NotPermittedToAssign => Self::Unauthorized(
                "Only admins are permitted to assign follow-ups to other users".into(),
            ),
            UseCaseError::ClientNotFound(client_id) => Self::NotFound(format!(
                "The client with id: {}, was not found.",
                client_id
            )),
            UseCaseError::AssigneeNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateFollowUpUseCase {
    type Response = FollowUpDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        if !FollowUp::is_schedulable_due_date(self.due_at, now) {
            return Err(UseCaseError::DueDateNotFarEnoughAhead);
        }

        let assignee = match &self.assigned_to {
            Some(user_id) if *user_id != self.user.id => {
                if !self.user.is_admin() {
                    return Err(UseCaseError::NotPermittedToAssign);
                }
                match ctx.repos.users.find(user_id).await {
                    Some(user) => user,
                    None => return Err(UseCaseError::AssigneeNotFound(user_id.clone())),
                }
            }
            _ => self.user.clone(),
        };

        let client = match ctx.repos.clients.find(&self.client_id).await {
            Some(client) if self.user.is_admin() || client.user_id == self.user.id => client,
            _ => return Err(UseCaseError::ClientNotFound(self.client_id.clone())),
        };

        let follow_up = FollowUp::new(
            client.id.clone(),
            assignee.id.clone(),
            self.due_at,
            self.note.clone(),
            now,
        );
        ctx.repos
            .follow_ups
            .insert(&follow_up)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(FollowUpDTO::new(
            follow_up,
            Some(client.name),
            Some(assignee.name),
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::{FollowUpStatus, UserRole};

    #[actix_web::test]
    async fn creates_a_follow_up_with_a_future_due_date() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let user = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &user).await;

        let usecase = CreateFollowUpUseCase {
            client_id: client.id.clone(),
            assigned_to: None,
            due_at: now + 60 * MINUTE,
            note: Some("ask about renewal".into()),
            user: user.clone(),
        };
        let follow_up = execute(usecase, &ctx).await.expect("To create follow-up");

        assert_eq!(follow_up.client_name, Some("Acme Travels".to_string()));
        assert_eq!(follow_up.user_id, user.id);
        assert_eq!(follow_up.status, FollowUpStatus::Upcoming);
        assert!(!follow_up.is_completed);
        assert_eq!(ctx.repos.follow_ups.find_all().await.len(), 1);
    }

    #[actix_web::test]
    async fn rejects_a_due_date_less_than_a_minute_ahead() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let user = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &user).await;

        for due_at in [now - MINUTE, now, now + MINUTE].iter() {
            let usecase = CreateFollowUpUseCase {
                client_id: client.id.clone(),
                assigned_to: None,
                due_at: *due_at,
                note: None,
                user: user.clone(),
            };
            assert_eq!(
                execute(usecase, &ctx).await.unwrap_err(),
                UseCaseError::DueDateNotFarEnoughAhead
            );
        }
        assert!(ctx.repos.follow_ups.find_all().await.is_empty());
    }

    #[actix_web::test]
    async fn only_admins_assign_to_other_users() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let other = seed_user(&ctx, "Omar", UserRole::Member).await;
        let admin = seed_user(&ctx, "Root", UserRole::Admin).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;

        let usecase = CreateFollowUpUseCase {
            client_id: client.id.clone(),
            assigned_to: Some(other.id.clone()),
            due_at: now + 60 * MINUTE,
            note: None,
            user: member,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotPermittedToAssign
        );

        let usecase = CreateFollowUpUseCase {
            client_id: client.id.clone(),
            assigned_to: Some(other.id.clone()),
            due_at: now + 60 * MINUTE,
            note: None,
            user: admin,
        };
        let follow_up = execute(usecase, &ctx).await.expect("To create follow-up");
        assert_eq!(follow_up.user_id, other.id);
    }
}
