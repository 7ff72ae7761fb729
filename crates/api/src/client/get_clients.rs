use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_clients::*;
use recall_domain::{Client, User};
use recall_infra::RecallContext;

pub async fn get_clients_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetClientsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|clients| HttpResponse::Ok().json(APIResponse::new(clients)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetClientsUseCase {
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
impl UseCase for GetClientsUseCase {
    type Response = Vec<Client>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetClients";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let clients = if self.user.is_admin() {
            ctx.repos.clients.find_all().await
        } else {
            ctx.repos.clients.find_by_user(&self.user.id).await
        };
        Ok(clients)
    }
}
