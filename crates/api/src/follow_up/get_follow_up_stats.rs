use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_follow_up_stats::APIResponse;
use recall_domain::User;
use recall_infra::RecallContext;

pub async fn get_follow_up_stats_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetFollowUpStatsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|stats| {
            HttpResponse::Ok().json(APIResponse {
                completed: stats.completed,
                missed: stats.missed,
                rescheduled: stats.rescheduled,
            })
        })
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetFollowUpStatsUseCase {
    pub user: User,
}

#[derive(Debug)]
pub struct FollowUpStats {
    pub completed: usize,
    /// Open follow-ups whose due time has passed
    pub missed: usize,
    /// Open follow-ups carrying an action reason, i.e. pushed to a new date
    pub rescheduled: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RecallError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFollowUpStatsUseCase {
    type Response = FollowUpStats;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFollowUpStats";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let follow_ups = if self.user.is_admin() {
            ctx.repos.follow_ups.find_all().await
        } else {
            ctx.repos.follow_ups.find_by_user(&self.user.id).await
        };

        let now = ctx.sys.get_timestamp_millis();
        let mut stats = FollowUpStats {
            completed: 0,
            missed: 0,
            rescheduled: 0,
        };
        for follow_up in follow_ups {
            if follow_up.is_completed {
                stats.completed += 1;
                continue;
            }
            if follow_up.is_overdue(now) {
                stats.missed += 1;
            }
            if follow_up.action_reason.is_some() {
                stats.rescheduled += 1;
            }
        }

        Ok(stats)
    }
}
