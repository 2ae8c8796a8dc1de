use sqlx::PgPool;

use super::models::AdminUser;
use super::StoreError;

/// Persistence layer for admin credential records
#[derive(Clone)]
pub struct AdminStore {
    pool: PgPool,
}

impl AdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, StoreError> {
        let admin = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AdminUser>, StoreError> {
        let admin = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    /// Insert or replace the credentials for a username. Used by the
    /// `seed-admin` provisioning binary, never by request flows.
    pub async fn upsert(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<AdminUser, StoreError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (username)
            DO UPDATE SET password = EXCLUDED.password, role = EXCLUDED.role, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }
}
