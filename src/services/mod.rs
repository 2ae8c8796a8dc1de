pub mod login;
pub mod project;

pub use login::LoginService;
pub use project::ProjectService;
