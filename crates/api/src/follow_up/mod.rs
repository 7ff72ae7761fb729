mod acknowledge_follow_up;
mod complete_follow_up;
mod create_follow_up;
mod delete_follow_up;
pub mod due_soon_scan;
mod get_follow_up;
mod get_follow_up_stats;
mod get_follow_ups;
mod get_unacknowledged_follow_ups;
mod get_upcoming_follow_ups;
pub mod overdue_scan;
mod reschedule_follow_up;
mod send_follow_up_reminder;

use acknowledge_follow_up::acknowledge_follow_up_controller;
use actix_web::web;
use complete_follow_up::complete_follow_up_controller;
use create_follow_up::create_follow_up_controller;
use delete_follow_up::delete_follow_up_controller;
use get_follow_up::get_follow_up_controller;
use get_follow_up_stats::get_follow_up_stats_controller;
use get_follow_ups::get_follow_ups_controller;
use get_unacknowledged_follow_ups::get_unacknowledged_follow_ups_controller;
use get_upcoming_follow_ups::get_upcoming_follow_ups_controller;
use reschedule_follow_up::reschedule_follow_up_controller;
use send_follow_up_reminder::send_follow_up_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/follow_ups", web::post().to(create_follow_up_controller));
    cfg.route("/follow_ups", web::get().to(get_follow_ups_controller));

    // static paths before `{follow_up_id}` so they are matched first
    cfg.route(
        "/follow_ups/upcoming",
        web::get().to(get_upcoming_follow_ups_controller),
    );
    cfg.route(
        "/follow_ups/unacknowledged",
        web::get().to(get_unacknowledged_follow_ups_controller),
    );
    cfg.route(
        "/follow_ups/stats",
        web::get().to(get_follow_up_stats_controller),
    );

    cfg.route(
        "/follow_ups/{follow_up_id}",
        web::get().to(get_follow_up_controller),
    );
    cfg.route(
        "/follow_ups/{follow_up_id}",
        web::delete().to(delete_follow_up_controller),
    );
    cfg.route(
        "/follow_ups/{follow_up_id}/complete",
        web::post().to(complete_follow_up_controller),
    );
    cfg.route(
        "/follow_ups/{follow_up_id}/reschedule",
        web::post().to(reschedule_follow_up_controller),
    );
    cfg.route(
        "/follow_ups/{follow_up_id}/acknowledge",
        web::post().to(acknowledge_follow_up_controller),
    );
    cfg.route(
        "/follow_ups/{follow_up_id}/remind",
        web::post().to(send_follow_up_reminder_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use recall_domain::{Client, FollowUp, User, UserRole, ID};
    use recall_infra::{IFollowUpRepo, ISys, RecallContext};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub const MINUTE: i64 = 60 * 1000;

    pub struct StaticTimeSys(pub i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    pub fn setup_ctx(now: i64) -> RecallContext {
        let mut ctx = RecallContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now));
        ctx.config.due_soon_thresholds = vec![10, 5];
        ctx.config.notify_admins_on_due_soon = false;
        ctx
    }

    pub fn set_time(ctx: &mut RecallContext, now: i64) {
        ctx.sys = Arc::new(StaticTimeSys(now));
    }

    pub async fn seed_user(ctx: &RecallContext, name: &str, role: UserRole) -> User {
        let user = User::new(
            name.to_string(),
            format!("{}@example.org", name.to_lowercase()),
            role,
        );
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn seed_client(ctx: &RecallContext, name: &str, owner: &User) -> Client {
        let client = Client::new(
            name.to_string(),
            owner.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos.clients.insert(&client).await.unwrap();
        client
    }

    pub async fn seed_follow_up(
        ctx: &RecallContext,
        client: &Client,
        assignee: &User,
        due_at: Option<i64>,
    ) -> FollowUp {
        let mut follow_up = FollowUp::new(
            client.id.clone(),
            assignee.id.clone(),
            due_at.unwrap_or_default(),
            None,
            ctx.sys.get_timestamp_millis(),
        );
        follow_up.due_at = due_at;
        ctx.repos.follow_ups.insert(&follow_up).await.unwrap();
        follow_up
    }

    /// Wraps the follow-up repo and counts every call that reaches the
    /// store, reads included.
    pub struct CountingFollowUpRepo {
        inner: Arc<dyn IFollowUpRepo>,
        calls: Arc<AtomicUsize>,
    }

    impl CountingFollowUpRepo {
        pub fn wrap(ctx: &mut RecallContext) -> Arc<AtomicUsize> {
            let calls = Arc::new(AtomicUsize::new(0));
            ctx.repos.follow_ups = Arc::new(Self {
                inner: ctx.repos.follow_ups.clone(),
                calls: calls.clone(),
            });
            calls
        }
    }

    #[async_trait::async_trait]
    impl IFollowUpRepo for CountingFollowUpRepo {
        async fn insert(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(follow_up).await
        }

        async fn save(&self, follow_up: &FollowUp) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.save(follow_up).await
        }

        async fn find(&self, follow_up_id: &ID) -> Option<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find(follow_up_id).await
        }

        async fn delete(&self, follow_up_id: &ID) -> Option<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(follow_up_id).await
        }

        async fn find_all(&self) -> Vec<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_all().await
        }

        async fn find_by_user(&self, user_id: &ID) -> Vec<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_user(user_id).await
        }

        async fn find_open(&self) -> Vec<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_open().await
        }

        async fn find_due_before(&self, before: i64) -> Vec<FollowUp> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_due_before(before).await
        }
    }
}
