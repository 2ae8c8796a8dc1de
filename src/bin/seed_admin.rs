//! Provision (or rotate) the admin credential record.
//!
//! The login flow never creates users; this binary is the out-of-band
//! seeding step: `seed-admin --username admin --password <secret>`.

use anyhow::{Context, Result};
use clap::Parser;

use portfolio_api::config::AppConfig;
use portfolio_api::database::{self, admin_store::AdminStore};
use portfolio_api::services::login::{normalize_username, LoginRequest};

#[derive(Parser)]
#[command(name = "seed-admin", about = "Provision or update the portfolio admin user")]
struct Args {
    #[arg(long)]
    username: String,

    #[arg(long)]
    password: String,

    #[arg(long, default_value = "admin", value_parser = ["admin", "other"])]
    role: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Same boundary rules as the login endpoint
    LoginRequest { username: args.username.clone(), password: args.password.clone() }.validate()?;

    let config = AppConfig::from_env().context("loading configuration")?;
    let pool = database::connect(&config.database).context("building database pool")?;
    database::ensure_schema(&pool).await.context("ensuring schema")?;

    let store = AdminStore::new(pool);
    let admin = store
        .upsert(&normalize_username(&args.username), &args.password, &args.role)
        .await
        .context("upserting admin user")?;

    println!("Provisioned '{}' (id {}) with role {}", admin.username, admin.id, admin.role);
    Ok(())
}
