use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "thumbnailer=debug,tower_http=debug";

/// Initialize tracing
///
/// `RUST_LOG` overrides the default filter. Production emits one JSON object
/// per line for log collectors; everything else uses the human-readable format.
pub fn init_telemetry(is_production: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    );

    if is_production {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    tracing::debug!(json = is_production, "Tracing initialized");
    Ok(())
}
