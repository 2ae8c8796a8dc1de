use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Portfolio project row.
///
/// `image` always holds a server-generated stored filename previously
/// accepted by the upload boundary; the service never checks that the file
/// still exists on disk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub link: String,
    pub github: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
