pub mod admin_user;
pub mod project;

pub use admin_user::{AdminUser, ROLE_ADMIN};
pub use project::Project;
