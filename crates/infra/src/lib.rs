mod config;
mod ledger;
mod repos;
mod system;

pub use config::Config;
pub use ledger::{INotificationLedger, InMemoryNotificationLedger};
pub use repos::{
    DeleteResult, IAcknowledgmentRepo, IClientRepo, IFollowUpRepo, INotificationRepo, IUserRepo,
    Repos,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct RecallContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub ledger: Arc<dyn INotificationLedger>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl RecallContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            ledger: Arc::new(InMemoryNotificationLedger::new()),
        }
    }

    /// Context backed entirely by process memory, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            ledger: Arc::new(InMemoryNotificationLedger::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> RecallContext {
    RecallContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
