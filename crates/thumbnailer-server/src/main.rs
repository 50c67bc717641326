use thumbnailer_core::Config;
use thumbnailer_server::{setup, telemetry};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let (_state, router) = setup::initialize_app(&config).await?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
