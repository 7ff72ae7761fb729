use crate::error::RecallError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::dtos::FollowUpDTO;
use recall_api_structs::get_follow_ups::*;
use recall_domain::{FollowUp, FollowUpStatus, User, ID};
use recall_infra::RecallContext;
use std::collections::HashMap;

pub async fn get_follow_ups_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetFollowUpsUseCase {
        status: query_params.status,
        client_id: query_params.client_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|follow_ups| HttpResponse::Ok().json(APIResponse::new(follow_ups)))
        .map_err(RecallError::from)
}

#[derive(Debug)]
pub struct GetFollowUpsUseCase {
    pub status: Option<FollowUpStatus>,
    pub client_id: Option<ID>,
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RecallError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

/// Resolves display names for a batch of follow-ups in two lookups.
/// Names can be missing when the referenced record is gone, rows render
/// anyway.
pub async fn resolve_display_names(
    follow_ups: &[FollowUp],
    ctx: &RecallContext,
) -> (HashMap<ID, String>, HashMap<ID, String>) {
    let client_ids = follow_ups
        .iter()
        .map(|f| f.client_id.clone())
        .collect::<Vec<_>>();
    let client_names = ctx
        .repos
        .clients
        .find_many(&client_ids)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.id.clone(), c.name))
        .collect::<HashMap<_, _>>();

    let user_ids = follow_ups
        .iter()
        .map(|f| f.user_id.clone())
        .collect::<Vec<_>>();
    let user_names = ctx
        .repos
        .users
        .find_many(&user_ids)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|u| (u.id.clone(), u.name))
        .collect::<HashMap<_, _>>();

    (client_names, user_names)
}

pub fn to_dtos(
    follow_ups: Vec<FollowUp>,
    client_names: &HashMap<ID, String>,
    user_names: &HashMap<ID, String>,
    now: i64,
) -> Vec<FollowUpDTO> {
    follow_ups
        .into_iter()
        .map(|follow_up| {
            let client_name = client_names.get(&follow_up.client_id).cloned();
            let assigned_to_name = user_names.get(&follow_up.user_id).cloned();
            FollowUpDTO::new(follow_up, client_name, assigned_to_name, now)
        })
        .collect()
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFollowUpsUseCase {
    type Response = Vec<FollowUpDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFollowUps";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let mut follow_ups = if self.user.is_admin() {
            ctx.repos.follow_ups.find_all().await
        } else {
            ctx.repos.follow_ups.find_by_user(&self.user.id).await
        };

        if let Some(client_id) = &self.client_id {
            follow_ups.retain(|f| f.client_id == *client_id);
        }

        let now = ctx.sys.get_timestamp_millis();
        if let Some(status) = self.status {
            follow_ups.retain(|f| f.status(now) == status);
        }

        let (client_names, user_names) = resolve_display_names(&follow_ups, ctx).await;
        Ok(to_dtos(follow_ups, &client_names, &user_names, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use recall_domain::UserRole;

    async fn seed_mixed_records(
        ctx: &RecallContext,
        now: i64,
    ) -> (User, User) {
        let member = seed_user(ctx, "Dana", UserRole::Member).await;
        let admin = seed_user(ctx, "Root", UserRole::Admin).await;
        let client = seed_client(ctx, "Acme Travels", &member).await;
        let other_client = seed_client(ctx, "Borealis Ltd", &admin).await;

        // upcoming for member, expired for member, completed for admin
        seed_follow_up(ctx, &client, &member, Some(now + 30 * MINUTE)).await;
        seed_follow_up(ctx, &client, &member, Some(now - 30 * MINUTE)).await;
        let mut completed =
            seed_follow_up(ctx, &other_client, &admin, Some(now + 60 * MINUTE)).await;
        completed.is_completed = true;
        ctx.repos.follow_ups.save(&completed).await.unwrap();

        (member, admin)
    }

    #[actix_web::test]
    async fn scopes_by_role() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let (member, admin) = seed_mixed_records(&ctx, now).await;

        let usecase = GetFollowUpsUseCase {
            status: None,
            client_id: None,
            user: member,
        };
        assert_eq!(execute(usecase, &ctx).await.unwrap().len(), 2);

        let usecase = GetFollowUpsUseCase {
            status: None,
            client_id: None,
            user: admin,
        };
        assert_eq!(execute(usecase, &ctx).await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn filters_by_derived_status() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let (_, admin) = seed_mixed_records(&ctx, now).await;

        for (status, expected) in [
            (FollowUpStatus::Upcoming, 1),
            (FollowUpStatus::Expired, 1),
            (FollowUpStatus::Completed, 1),
        ]
        .iter()
        {
            let usecase = GetFollowUpsUseCase {
                status: Some(*status),
                client_id: None,
                user: admin.clone(),
            };
            let follow_ups = execute(usecase, &ctx).await.unwrap();
            assert_eq!(follow_ups.len(), *expected);
            assert!(follow_ups.iter().all(|f| f.status == *status));
        }
    }

    #[actix_web::test]
    async fn resolves_display_names_on_rows() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;

        let usecase = GetFollowUpsUseCase {
            status: None,
            client_id: None,
            user: member,
        };
        let follow_ups = execute(usecase, &ctx).await.unwrap();
        assert_eq!(follow_ups[0].client_name, Some("Acme Travels".to_string()));
        assert_eq!(follow_ups[0].assigned_to_name, Some("Dana".to_string()));
        assert_eq!(follow_ups[0].time_left, "30m left");
    }
}
