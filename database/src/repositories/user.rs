use async_trait::async_trait;
use sqlx::PgPool;

use carona_models::{NewUser, UserRecord};

use crate::error::StoreError;
use crate::store::UserStore;

const USER_COLUMNS: &str =
    "id, name, national_id, password_hash, enrollment_code, email, birth_date, created_at";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE national_id = $1",
            USER_COLUMNS
        ))
        .bind(national_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn save(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let saved = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (name, national_id, password_hash, enrollment_code, email, birth_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.name)
        .bind(&user.national_id)
        .bind(&user.password_hash)
        .bind(user.enrollment_code.as_deref())
        .bind(user.email.as_deref())
        .bind(user.birth_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let err = StoreError::from_insert(e);
            if !err.is_conflict() {
                tracing::error!("Database error creating user: {:?}", err);
            }
            err
        })?;

        Ok(saved)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
