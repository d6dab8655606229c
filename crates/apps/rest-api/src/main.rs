use rest_api::{AppConfig, AppState, build_router};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("Connected to database");

    sqlx::migrate!("../../../migrations").run(&pool).await?;

    info!("Migrations complete");

    if config.trust_token_header {
        info!("Reading principals from the token payload header");
    }

    let app =
        build_router(AppState::postgres(pool).trusting_token_header(config.trust_token_header));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    info!("REST API listening on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
