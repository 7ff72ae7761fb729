use super::IUserRepo;
use recall_domain::{User, UserRole, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    email: String,
    role: String,
}

impl Into<User> for UserRaw {
    fn into(self) -> User {
        User {
            id: ID::from(self.user_uid),
            name: self.name,
            email: self.email,
            role: UserRole::parse(&self.role).unwrap_or(UserRole::Member),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, name, email, role)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            "SELECT user_uid, name, email, role FROM users WHERE user_uid = $1",
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        let ids = user_ids.iter().map(|id| *id.inner_ref()).collect::<Vec<_>>();
        let users = sqlx::query_as::<_, UserRaw>(
            "SELECT user_uid, name, email, role FROM users WHERE user_uid = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users.into_iter().map(|user| user.into()).collect())
    }

    async fn find_all(&self) -> Vec<User> {
        sqlx::query_as::<_, UserRaw>("SELECT user_uid, name, email, role FROM users ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|user| user.into())
            .collect()
    }

    async fn find_admins(&self) -> Vec<User> {
        sqlx::query_as::<_, UserRaw>(
            "SELECT user_uid, name, email, role FROM users WHERE role = 'admin'",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|user| user.into())
        .collect()
    }
}
