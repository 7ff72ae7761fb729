use recall_api::Application;
use recall_domain::{User, UserRole};
use recall_infra::RecallContext;

pub struct TestApp {
    /// Shares the repos with the running application
    pub ctx: RecallContext,
    pub admin: User,
    pub address: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

// Launch the application as a background task on a random port, backed
// by in-memory repositories and seeded with one admin.
pub async fn spawn_app() -> TestApp {
    let mut ctx = RecallContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let admin = User::new("Root".into(), "root@example.org".into(), UserRole::Admin);
    ctx.repos
        .users
        .insert(&admin)
        .await
        .expect("To seed admin user");

    let shared_ctx = ctx.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        ctx: shared_ctx,
        admin,
        address,
    }
}
