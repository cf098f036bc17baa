//! Helpers shared by CLI commands.

use chrono::{Local, NaiveDateTime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use traveltime_core::{EstimatorConfig, ValidationError};

/// Install the stderr log subscriber. `RUST_LOG` overrides the defaults.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("traveltime_core=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("traveltime_core=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Parse `--at`, defaulting to the current local time.
pub fn parse_event_time(value: Option<&str>) -> Result<NaiveDateTime, ValidationError> {
    let Some(value) = value else {
        return Ok(Local::now().naive_local());
    };

    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| ValidationError::InvalidDateTime(value.to_string()))
}

/// Stored config, or the defaults if it cannot be read.
pub fn load_config() -> EstimatorConfig {
    EstimatorConfig::load_or_default()
}
