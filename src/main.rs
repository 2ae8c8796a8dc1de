use portfolio_api::config::AppConfig;
use portfolio_api::database;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match database::connect(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("database configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Best effort: the server still boots (and reports a degraded /health)
    // when the database is not reachable yet.
    {
        let pool = pool.clone();
        tokio::spawn(async move {
            if let Err(e) = database::ensure_schema(&pool).await {
                tracing::warn!("Could not ensure database schema: {}", e);
            }
        });
    }

    let port = config.server.port;
    let state = AppState::new(config, pool);
    let app = portfolio_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
