use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banquet_api::{build_router, config::Config, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    info!(
        booking_window_months = config.booking_window_months,
        utc_offset_minutes = config.utc_offset_minutes,
        "booking rules loaded"
    );

    let state = AppState {
        db: pool,
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("banquet API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
