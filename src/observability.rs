use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing and logging.
///
/// Structured JSON logging when `ENVIRONMENT=production`, pretty console
/// output otherwise; log level from `RUST_LOG` or the configured default.
pub fn init_observability(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    if is_production {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_filter(env_filter))
            .try_init()?;
    }

    Ok(())
}
