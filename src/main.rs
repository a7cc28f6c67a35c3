use std::sync::Arc;

use anyhow::Context;

use course_catalog::config::AppConfig;
use course_catalog::state::{connect_pool, AppState};
use course_catalog::{app, error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::from_env()?);

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.default_log_filter());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    error::set_expose_internal(!config.run_mode.is_production());

    let db = connect_pool(&config).await?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    let state = AppState::from_parts(db, config.clone());
    let app = app::build_app(state);

    app::serve(app, &config).await
}
