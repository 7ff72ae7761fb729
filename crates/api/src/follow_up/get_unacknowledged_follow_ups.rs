use super::get_follow_ups::{resolve_display_names, to_dtos};
use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::dtos::FollowUpDTO;
use recall_api_structs::get_unacknowledged_follow_ups::*;
use recall_domain::User;
use recall_infra::RecallContext;

pub async fn get_unacknowledged_follow_ups_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetUnacknowledgedFollowUpsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|follow_ups| HttpResponse::Ok().json(APIResponse::new(follow_ups)))
        .map_err(RecallError::from)
}

/// The poll behind the blocking overdue dialog: every overdue follow-up
/// visible to the caller that they have not yet acknowledged, oldest due
/// first. The caller surfaces the first of the batch; the same records
/// keep coming back until each is acknowledged.
#[derive(Debug)]
pub struct GetUnacknowledgedFollowUpsUseCase {
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
impl UseCase for GetUnacknowledgedFollowUpsUseCase {
    type Response = Vec<FollowUpDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUnacknowledgedFollowUps";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let mut overdue = ctx.repos.follow_ups.find_due_before(now).await;
        if !self.user.is_admin() {
            overdue.retain(|f| f.user_id == self.user.id);
        }

        let mut unacknowledged = Vec::new();
        for follow_up in overdue {
            let acknowledged = ctx
                .repos
                .acknowledgments
                .find_by_follow_up_and_user(&follow_up.id, &self.user.id)
                .await
                .is_some();
            if !acknowledged {
                unacknowledged.push(follow_up);
            }
        }

        let (client_names, user_names) = resolve_display_names(&unacknowledged, ctx).await;
        Ok(to_dtos(unacknowledged, &client_names, &user_names, now))
    }
}
