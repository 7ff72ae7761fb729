use crate::error::RecallError;
use crate::shared::{
    auth::{ensure_admin, protect_route},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::create_user::*;
use recall_domain::{User, UserRole};
use recall_infra::RecallContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;
    ensure_admin(&user)?;

    let body = body.0;
    let usecase = CreateUserUseCase {
        name: body.name,
        email: body.email,
        role: body.role,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("A user name is required".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let user = User::new(self.name.clone(), self.email.clone(), self.role);
        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
