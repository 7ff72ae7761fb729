use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_client::*;
use recall_domain::{Client, User, ID};
use recall_infra::RecallContext;

pub async fn get_client_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetClientUseCase {
        client_id: path_params.client_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|client| HttpResponse::Ok().json(APIResponse::new(client)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetClientUseCase {
    pub client_id: ID,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(client_id) => Self::NotFound(format!(
                "The client with id: {}, was not found.",
                client_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetClientUseCase {
    type Response = Client;

    type Error = UseCaseError;

    const NAME: &'static str = "GetClient";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.clients.find(&self.client_id).await {
            Some(client) if self.user.is_admin() || client.user_id == self.user.id => Ok(client),
            _ => Err(UseCaseError::NotFound(self.client_id.clone())),
        }
    }
}
