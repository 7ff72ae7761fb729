use crate::shared::usecase::UseCase;
use recall_domain::ID;
use recall_infra::RecallContext;
use serde::Serialize;
use std::collections::HashMap;

/// One pass of the overdue scan: every open follow-up past its due time
/// whose assignee has not acknowledged it. Deliberately not deduplicated,
/// the same record surfaces tick after tick until someone acknowledges
/// it.
#[derive(Debug)]
pub struct OverdueScanUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueAlert {
    pub follow_up_id: ID,
    /// The assignee the alert is addressed to
    pub user_id: ID,
    pub message: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for OverdueScanUseCase {
    type Response = Vec<OverdueAlert>;

    type Error = UseCaseError;

    const NAME: &'static str = "OverdueScan";

    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let overdue = ctx.repos.follow_ups.find_due_before(now).await;

        let client_ids = overdue
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

        let mut alerts = Vec::new();
        for follow_up in overdue {
            let acknowledged = ctx
                .repos
                .acknowledgments
                .find_by_follow_up_and_user(&follow_up.id, &follow_up.user_id)
                .await
                .is_some();
            if acknowledged {
                continue;
            }

            let client_name = client_names
                .get(&follow_up.client_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            alerts.push(OverdueAlert {
                follow_up_id: follow_up.id.clone(),
                user_id: follow_up.user_id.clone(),
                message: format!("Follow-up with {} is due now!", client_name),
            });
        }

        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow_up::test_helpers::*;
    use crate::shared::usecase::execute;
    use recall_domain::{AcknowledgmentRecord, UserRole};

    #[actix_web::test]
    async fn keeps_alerting_until_the_assignee_acknowledges() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;
        let overdue = seed_follow_up(&ctx, &client, &member, Some(now - 5 * MINUTE)).await;

        let alerts = execute(OverdueScanUseCase {}, &ctx).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].follow_up_id, overdue.id);
        assert_eq!(
            alerts[0].message,
            "Follow-up with Acme Travels is due now!"
        );

        // next tick, still unacknowledged, alerts again
        let alerts = execute(OverdueScanUseCase {}, &ctx).await.unwrap();
        assert_eq!(alerts.len(), 1);

        let acknowledgment =
            AcknowledgmentRecord::new(overdue.id.clone(), member.id.clone(), now);
        ctx.repos
            .acknowledgments
            .insert(&acknowledgment)
            .await
            .unwrap();

        assert!(execute(OverdueScanUseCase {}, &ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn future_and_completed_follow_ups_stay_quiet() {
        let now = 1000 * MINUTE;
        let ctx = setup_ctx(now);
        let member = seed_user(&ctx, "Dana", UserRole::Member).await;
        let client = seed_client(&ctx, "Acme Travels", &member).await;

        seed_follow_up(&ctx, &client, &member, Some(now + 30 * MINUTE)).await;
        let mut completed = seed_follow_up(&ctx, &client, &member, Some(now - MINUTE)).await;
        completed.is_completed = true;
        ctx.repos.follow_ups.save(&completed).await.unwrap();

        assert!(execute(OverdueScanUseCase {}, &ctx).await.unwrap().is_empty());
    }
}
