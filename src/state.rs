use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::admin_store::AdminStore;
use crate::database::project_store::ProjectStore;
use crate::services::{LoginService, ProjectService};

/// Everything the handlers need, wired once at startup. Dependencies are
/// constructor-injected here instead of living in any ambient registry.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub logins: LoginService,
    pub projects: ProjectService,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let logins = LoginService::new(AdminStore::new(pool.clone()), config.security.clone());
        let projects = ProjectService::new(ProjectStore::new(pool.clone()));

        Self { config: Arc::new(config), pool, logins, projects }
    }
}
