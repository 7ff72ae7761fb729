use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::acknowledge_follow_up::*;
use recall_api_structs::dtos::AcknowledgmentDTO;
use recall_domain::{AcknowledgmentRecord, User, ID};
use recall_infra::RecallContext;

pub async fn acknowledge_follow_up_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = AcknowledgeFollowUpUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|acknowledgment| HttpResponse::Ok().json(APIResponse::new(acknowledgment)))
        .map_err(RecallError::from)
}

/// Records that the calling user has seen the overdue alert for a
/// follow-up, which keeps it out of their unacknowledged batch from the
/// next poll on. Acknowledging twice is a no-op.
#[derive(Debug)]
pub struct AcknowledgeFollowUpUseCase {
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

#[async_trait::async_trait(?Send)]
impl UseCase for AcknowledgeFollowUpUseCase {
    type Response = AcknowledgmentDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let follow_up = match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) if self.user.is_admin() || follow_up.user_id == self.user.id => {
                follow_up
            }
            _ => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        if let Some(existing) = ctx
            .repos
            .acknowledgments
            .find_by_follow_up_and_user(&follow_up.id, &self.user.id)
            .await
        {
            return Ok(AcknowledgmentDTO::new(existing));
        }

        let acknowledgment = AcknowledgmentRecord::new(
            follow_up.id.clone(),
            self.user.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .acknowledgments
            .insert(&acknowledgment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(AcknowledgmentDTO::new(acknowledgment))
    }
}
