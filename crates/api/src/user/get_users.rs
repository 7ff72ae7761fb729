use crate::error::RecallError;
use crate::shared::{
    auth::{ensure_admin, protect_route},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_users::*;
use recall_domain::User;
use recall_infra::RecallContext;

pub async fn get_users_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;
    ensure_admin(&user)?;

    let usecase = GetUsersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|users| HttpResponse::Ok().json(APIResponse::new(users)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetUsersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RecallError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUsersUseCase {
    type Response = Vec<User>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUsers";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.users.find_all().await)
    }
}
