use anyhow::{Context, Result};
use student_planner::api::{create_routes, AppState};
use student_planner::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(AppConfig::log_level_from_env())),
        )
        .init();

    let config = AppConfig::from_env()?;

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config
        .create_pool()
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if config.seeds_demo_data() {
        let seeder = DatabaseSeeder::new(pool.clone(), config.bcrypt_cost);
        if let Some(user_id) = seeder.seed_all().await? {
            info!("Seeded demo account with user id {}", user_id);
        }
    }

    let state = AppState::new(pool, config.bcrypt_cost);
    let app = create_routes(state, &config)?;

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(
        "Student planner server starting on http://{} ({})",
        address, config.environment
    );
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
