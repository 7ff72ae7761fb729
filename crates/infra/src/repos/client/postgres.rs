use super::IClientRepo;
use recall_domain::{Client, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRaw {
    client_uid: Uuid,
    name: String,
    user_uid: Uuid,
    created_at: i64,
}

impl Into<Client> for ClientRaw {
    fn into(self) -> Client {
        Client {
            id: ID::from(self.client_uid),
            name: self.name,
            user_id: ID::from(self.user_uid),
            created_at: self.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for PostgresClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients
            (client_uid, name, user_uid, created_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(&client.name)
        .bind(client.user_id.inner_ref())
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        sqlx::query_as::<_, ClientRaw>(
            "SELECT client_uid, name, user_uid, created_at FROM clients WHERE client_uid = $1",
        )
        .bind(client_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|client| client.into())
    }

    async fn find_many(&self, client_ids: &[ID]) -> anyhow::Result<Vec<Client>> {
        let ids = client_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let clients = sqlx::query_as::<_, ClientRaw>(
            "SELECT client_uid, name, user_uid, created_at FROM clients WHERE client_uid = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients.into_iter().map(|client| client.into()).collect())
    }

    async fn find_all(&self) -> Vec<Client> {
        sqlx::query_as::<_, ClientRaw>(
            "SELECT client_uid, name, user_uid, created_at FROM clients ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|client| client.into())
        .collect()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Client> {
        sqlx::query_as::<_, ClientRaw>(
            "SELECT client_uid, name, user_uid, created_at FROM clients WHERE user_uid = $1 ORDER BY name ASC",
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|client| client.into())
        .collect()
    }
}
