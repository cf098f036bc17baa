mod config;

pub use config::EstimatorConfig;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/traveltime[-dev]/` based on TRAVELTIME_ENV.
///
/// Set TRAVELTIME_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TRAVELTIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("traveltime-dev")
    } else {
        base_dir.join("traveltime")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
