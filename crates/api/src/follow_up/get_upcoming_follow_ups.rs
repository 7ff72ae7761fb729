use super::get_follow_ups::{resolve_display_names, to_dtos};
use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::dtos::FollowUpDTO;
use recall_api_structs::get_upcoming_follow_ups::*;
use recall_domain::User;
use recall_infra::RecallContext;

/// How many rows the dashboard widget shows by default
const DEFAULT_LIMIT: usize = 2;

pub async fn get_upcoming_follow_ups_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetUpcomingFollowUpsUseCase {
        limit: query_params.limit.unwrap_or(DEFAULT_LIMIT),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_ups| HttpResponse::Ok().json(APIResponse::new(follow_ups)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetUpcomingFollowUpsUseCase {
    pub limit: usize,
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
impl UseCase for GetUpcomingFollowUpsUseCase {
    type Response = Vec<FollowUpDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingFollowUps";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let mut follow_ups = ctx.repos.follow_ups.find_open().await;
        if !self.user.is_admin() {
            follow_ups.retain(|f| f.user_id == self.user.id);
        }
        // future only; the repo already orders by due date
        follow_ups.retain(|f| f.due_at.map(|due_at| due_at > now).unwrap_or(false));
        follow_ups.truncate(self.limit);

        let (client_names, user_names) = resolve_display_names(&follow_ups, ctx).await;
        Ok(to_dtos(follow_ups, &client_names, &user_names, now))
    }
}
