use sqlx::PgPool;

use super::models::Project;
use super::StoreError;

/// Persistence layer for the projects table. One row per portfolio entry,
/// keyed by integer id.
#[derive(Clone)]
pub struct ProjectStore {
    pool: PgPool,
}

impl ProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        title: &str,
        description: &str,
        image: &str,
        category: &str,
        link: &str,
        github: &str,
    ) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, image, category, link, github)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(image)
        .bind(category)
        .bind(link)
        .bind(github)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// All projects, newest first
    pub async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    /// Persist a merged row. No optimistic-concurrency token: concurrent
    /// saves to the same id are last-write-wins.
    pub async fn save(&self, project: &Project) -> Result<Project, StoreError> {
        let saved = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = $1, description = $2, image = $3, category = $4,
                link = $5, github = $6, updated_at = now()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image)
        .bind(&project.category)
        .bind(&project.link)
        .bind(&project.github)
        .bind(project.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
