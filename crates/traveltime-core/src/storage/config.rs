//! TOML-based estimator configuration.
//!
//! Stores:
//! - The same-location prep time and the base-table fallback
//! - Hemisphere used for seasonal adjustment
//! - Known cities for address parsing
//! - The user's location hints (home, work, university)
//! - Base time and bounds tables
//!
//! Configuration is stored at `~/.config/traveltime/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::adjust::Hemisphere;
use crate::error::{ConfigError, Result, ValidationError};
use crate::location::{CityList, UserProfile};
use crate::tables::{BaseTimeTable, BoundsTable, DEFAULT_BASE_MINUTES};

/// Minutes returned when origin and destination are the same place.
pub const DEFAULT_PREP_TIME_MINUTES: u32 = 8;

/// Estimator configuration.
///
/// Serialized to/from TOML at `~/.config/traveltime/config.toml`. Tables
/// present in the file replace the built-in ones entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_prep_time")]
    pub prep_time_minutes: u32,
    /// Used when the base table has no entry for a mode/category pair.
    #[serde(default = "default_base_minutes")]
    pub default_base_minutes: u32,
    #[serde(default)]
    pub hemisphere: Hemisphere,
    #[serde(default)]
    pub known_cities: CityList,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub base_times: BaseTimeTable,
    #[serde(default)]
    pub bounds: BoundsTable,
}

fn default_prep_time() -> u32 {
    DEFAULT_PREP_TIME_MINUTES
}
fn default_base_minutes() -> u32 {
    DEFAULT_BASE_MINUTES
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            prep_time_minutes: DEFAULT_PREP_TIME_MINUTES,
            default_base_minutes: DEFAULT_BASE_MINUTES,
            hemisphere: Hemisphere::default(),
            known_cities: CityList::default(),
            profile: UserProfile::default(),
            base_times: BaseTimeTable::default(),
            bounds: BoundsTable::default(),
        }
    }
}

impl EstimatorConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').filter(|p| !p.is_empty()).peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        let cfg: EstimatorConfig = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded estimator config");
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default estimator config");
            Self::default()
        })
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prep_time_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "prep_time_minutes".into(),
                message: "must be at least 1 minute".into(),
            });
        }
        self.bounds.validate()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: EstimatorConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::UserProfileView;
    use crate::transport::TransportMethod;

    #[test]
    fn default_config_roundtrip() {
        let cfg = EstimatorConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EstimatorConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: EstimatorConfig = toml::from_str("hemisphere = \"southern\"\n").unwrap();
        assert_eq!(parsed.hemisphere, Hemisphere::Southern);
        assert_eq!(parsed.prep_time_minutes, 8);
        assert_eq!(parsed.default_base_minutes, 20);
        assert_eq!(parsed.bounds, BoundsTable::default());
        assert_eq!(parsed.known_cities, CityList::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = EstimatorConfig::default();
        assert_eq!(cfg.get("prep_time_minutes").as_deref(), Some("8"));
        assert_eq!(cfg.get("hemisphere").as_deref(), Some("northern"));
        assert_eq!(cfg.get("bounds.car.max").as_deref(), Some("90"));
        assert_eq!(cfg.get("base_times.walking.nearby").as_deref(), Some("15"));
        assert!(cfg.get("bounds.car.missing").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = EstimatorConfig::default();
        cfg.set("bounds.public_transport.max", "150").unwrap();
        assert_eq!(cfg.bounds.get(TransportMethod::PublicTransport).unwrap().max, 150);
    }

    #[test]
    fn set_updates_enum_and_profile() {
        let mut cfg = EstimatorConfig::default();
        cfg.set("hemisphere", "southern").unwrap();
        assert_eq!(cfg.hemisphere, Hemisphere::Southern);

        cfg.set("profile.work_location", "Acme Corp").unwrap();
        assert_eq!(cfg.profile.work_location(), Some("Acme Corp"));
    }

    #[test]
    fn set_replaces_city_list_from_json() {
        let mut cfg = EstimatorConfig::default();
        cfg.set("known_cities", r#"["Berlin", "Munich"]"#).unwrap();
        assert_eq!(cfg.known_cities.len(), 2);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = EstimatorConfig::default();
        assert!(matches!(
            cfg.set("bounds.car.nonexistent", "1"),
            Err(crate::error::CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = EstimatorConfig::default();
        assert!(cfg.set("prep_time_minutes", "soon").is_err());
        assert!(cfg.set("hemisphere", "eastern").is_err());
        assert!(cfg.set("prep_time_minutes", "0").is_err());
        assert!(cfg.set("bounds.walking.min", "500").is_err());
        assert_eq!(cfg, EstimatorConfig::default());
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = EstimatorConfig::default();
        cfg.set("profile.location", "12 Oak Street").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = EstimatorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = EstimatorConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, EstimatorConfig::default());
    }

    #[test]
    fn load_from_rejects_invalid_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bounds.car]\nmin = 50\nmax = 10\n").unwrap();
        assert!(EstimatorConfig::load_from(&path).is_err());
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "prep_time_minutes = \"eight\"\n").unwrap();
        let err = EstimatorConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
