use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::create_client::*;
use recall_domain::{Client, User, ID};
use recall_infra::RecallContext;

pub async fn create_client_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateClientUseCase {
        name: body.name,
        owner: body.user_id,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|client| HttpResponse::Created().json(APIResponse::new(client)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct CreateClientUseCase {
    pub name: String,
    pub owner: Option<ID>,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    NotPermittedToAssign,
    OwnerNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RecallError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("A client name is required".into()),
            UseCaseError::NotPermittedToAssign => Self::Unauthorized(
                "Only admins are permitted to assign clients to other users".into(),
            ),
            UseCaseError::OwnerNotFound(user_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateClientUseCase {
    type Response = Client;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateClient";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let owner = match &self.owner {
            Some(user_id) if *user_id != self.user.id => {
                if !self.user.is_admin() {
                    return Err(UseCaseError::NotPermittedToAssign);
                }
                match ctx.repos.users.find(user_id).await {
                    Some(user) => user,
                    None => return Err(UseCaseError::OwnerNotFound(user_id.clone())),
                }
            }
            _ => self.user.clone(),
        };

        let client = Client::new(
            self.name.clone(),
            owner.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .clients
            .insert(&client)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::UserRole;

    #[actix_web::test]
    async fn creates_a_client_owned_by_the_caller() {
        let ctx = setup_ctx(1000 * MINUTE);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;

        let usecase = CreateClientUseCase {
            name: "Acme Travels".into(),
            owner: None,
            user: member.clone(),
        };
        let client = execute(usecase, &ctx).await.expect("To create client");
        assert_eq!(client.user_id, member.id);
        assert_eq!(ctx.repos.clients.find(&client.id).await.unwrap().name, "Acme Travels");
    }

    #[actix_web::test]
    async fn rejects_a_blank_name() {
        let ctx = setup_ctx(1000 * MINUTE);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;

        let usecase = CreateClientUseCase {
            name: "  ".into(),
            owner: None,
            user: member,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::EmptyName
        );
        assert!(ctx.repos.clients.find_all().await.is_empty());
    }
}
