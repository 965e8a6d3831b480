use anyhow::Context;
use employee_service::app::router;
use employee_service::config::Config;
use employee_service::spanner::SpannerClient;
use employee_service::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("employee-service starting");

    let config = Config::from_env()?;
    config.log_startup();

    let spanner_client = SpannerClient::from_config(&config).await?;

    let address = config.bind_address();
    let app = router(AppState::new(spanner_client));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server is running on {}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
