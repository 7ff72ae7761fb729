use crate::shared::usecase::UseCase;
use recall_domain::{due_in_minutes, threshold_hit, DueSoonKey, Notification, ID};
use recall_infra::RecallContext;
use serde::Serialize;
use std::collections::HashMap;
use tracing::error;

/// One pass of the due-soon detector. Runs on a fixed tick over the open
/// follow-ups and fires each configured minute threshold at most once per
/// process lifetime, remembering fired (follow-up, threshold) pairs in
/// the context's ledger.
///
/// A threshold fires only when the floored minutes-until-due equal it
/// exactly. A tick that lands after the matching minute has passed never
/// fires that threshold.
#[derive(Debug)]
pub struct DueSoonScanUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

/// What a firing looks like to the outside: the log line, the optional
/// webhook batch, nothing more. The notification rows are written as a
/// side effect before this is returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueSoonAlert {
    pub follow_up_id: ID,
    pub threshold_minutes: i64,
    pub message: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DueSoonScanUseCase {
    type Response = Vec<DueSoonAlert>;

    type Error = UseCaseError;

    const NAME: &'static str = "DueSoonScan";

    /// This will run every minute
    async fn execute(&mut self, ctx: &RecallContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let thresholds = ctx.config.due_soon_thresholds.clone();

        let follow_ups = ctx.repos.follow_ups.find_open().await;

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

        let admins = if ctx.config.notify_admins_on_due_soon {
            ctx.repos.users.find_admins().await
        } else {
            Vec::new()
        };

        let mut alerts = Vec::new();
        for follow_up in follow_ups {
            let due_at = match follow_up.due_at {
                Some(due_at) => due_at,
                None => continue,
            };
            let diff_minutes = due_in_minutes(due_at, now);
            let threshold = match threshold_hit(diff_minutes, &thresholds) {
                Some(threshold) => threshold,
                None => continue,
            };
            let key = DueSoonKey::new(follow_up.id.clone(), threshold);
            if ctx.ledger.has_fired(&key) {
                continue;
            }

            let client_name = client_names
                .get(&follow_up.client_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            let message = format!(
                "Follow-up with {} in {} minutes: {}",
                client_name,
                threshold,
                follow_up.display_note().unwrap_or_default()
            );
            let row_message = format!("Follow-up with {} in {} minutes", client_name, threshold);

            // Row inserts are fire-and-forget: a failure is logged, never
            // retried, and the key is marked fired regardless. Alerting
            // and row insertion are not atomic.
            let notification = Notification::new(
                follow_up.id.clone(),
                follow_up.user_id.clone(),
                row_message.clone(),
                follow_up.user_id.clone(),
                now,
            );
            if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                error!(
                    "Unable to insert due-soon notification for follow-up: {}. Error: {:?}",
                    follow_up.id, e
                );
            }
            for admin in &admins {
                if admin.id == follow_up.user_id {
                    continue;
                }
                let copy = Notification::new(
                    follow_up.id.clone(),
                    admin.id.clone(),
                    row_message.clone(),
                    follow_up.user_id.clone(),
                    now,
                );
                if let Err(e) = ctx.repos.notifications.insert(&copy).await {
                    error!(
                        "Unable to insert admin copy of due-soon notification for follow-up: {}. Error: {:?}",
                        follow_up.id, e
                    );
                }
            }

            ctx.ledger.mark_fired(key);
            alerts.push(DueSoonAlert {
                follow_up_id: follow_up.id.clone(),
                threshold_minutes: threshold,
                message,
            });
        }

        Ok(alerts)
    }
}
