use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single elevated role checked by the role-gated guard
pub const ROLE_ADMIN: &str = "admin";

/// Admin credential record. Provisioned out of band by `seed-admin`,
/// never mutated by request flows.
///
/// The password column holds the stored secret verbatim (see DESIGN.md,
/// "plaintext passwords").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
