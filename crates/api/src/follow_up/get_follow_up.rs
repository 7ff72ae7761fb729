use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::dtos::FollowUpDTO;
use recall_api_structs::get_follow_up::*;
use recall_domain::{User, ID};
use recall_infra::RecallContext;

pub async fn get_follow_up_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetFollowUpUseCase {
        follow_up_id: path_params.follow_up_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_up| HttpResponse::Ok().json(APIResponse::new(follow_up)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetFollowUpUseCase {
    pub follow_up_id: ID,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(follow_up_id) => Self::NotFound(format!(
                "The follow-up with id: {}, was not found.",
                follow_up_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFollowUpUseCase {
    type Response = FollowUpDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFollowUp";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let follow_up = match ctx.repos.follow_ups.find(&self.follow_up_id).await {
            Some(follow_up) if self.user.is_admin() || follow_up.user_id == self.user.id => {
                follow_up
            }
            _ => return Err(UseCaseError::NotFound(self.follow_up_id.clone())),
        };

        let client_name = ctx
            .repos
            .clients
            .find(&follow_up.client_id)
            .await
            .map(|client| client.name);
        let assigned_to_name = ctx
            .repos
            .users
            .find(&follow_up.user_id)
            .await
            .map(|user| user.name);

        let now = ctx.sys.get_timestamp_millis();
        Ok(FollowUpDTO::new(
            follow_up,
            client_name,
            assigned_to_name,
            now,
        ))
    }
}
