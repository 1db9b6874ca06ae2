use tea_payroll_engine::api::{AppState, create_router};
use tea_payroll_engine::config::{ConfigLoader, ServerSettings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .init();

    let settings = ServerSettings::from_env();
    info!("Starting server with settings: {:?}", settings);

    let config = ConfigLoader::load(&settings.config_dir)?;
    info!(
        estate = %config.estate().code,
        currency = %config.estate().currency,
        "Estate configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    info!("  GET  /health");
    info!("  POST /wage");
    info!("  POST /aggregate");
    info!("  POST /rollup");
    info!("  POST /rollup/monthly");

    axum::serve(listener, app).await?;

    Ok(())
}
