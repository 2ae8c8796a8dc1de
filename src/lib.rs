use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod uploads;

use state::AppState;

/// Build the full application router.
///
/// Reads are public; create/update require a valid bearer token; delete
/// additionally requires the admin role. Uploaded images are served
/// statically under the configured prefix.
pub fn app(state: AppState) -> Router {
    // Token-guarded writes
    let guarded = Router::new()
        .route("/projects", post(handlers::projects::create))
        .route("/projects/:id", patch(handlers::projects::update))
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_auth));

    // Role-gated delete
    let admin_only = Router::new()
        .route("/projects/:id", delete(handlers::projects::remove))
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_admin));

    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login::login))
        .route("/projects", get(handlers::projects::list))
        .route("/projects/:id", get(handlers::projects::get_one))
        .merge(guarded)
        .merge(admin_only)
        // Static serving of stored images
        .nest_service(
            state.config.uploads.public_prefix.as_str(),
            ServeDir::new(&state.config.uploads.dir),
        )
        // Global middleware
        .layer(DefaultBodyLimit::max(state.config.uploads.max_request_size_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
