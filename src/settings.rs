//! Runtime settings
//!
//! Loaded from an optional JSON file, then overridden from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::tuning::Tuning;

/// Why settings could not be loaded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    /// Gameplay balance
    pub tuning: Tuning,
    /// Cap on fixed steps run per controller update
    pub max_substeps: u32,
    /// Forward simulation events to the log in the headless runner
    pub log_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tuning: Tuning::default(),
            max_substeps: MAX_SUBSTEPS,
            log_events: true,
        }
    }
}

impl Settings {
    /// Environment variable overriding `seed`
    const ENV_SEED: &'static str = "PONG_SEED";
    /// Environment variable overriding `tuning.initial_ball_speed`
    const ENV_BALL_SPEED: &'static str = "PONG_BALL_SPEED";
    /// Environment variable overriding `tuning.max_ball_speed`
    const ENV_MAX_BALL_SPEED: &'static str = "PONG_MAX_BALL_SPEED";

    /// Parse and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// File (if given) plus environment overrides
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => Self::load(path)?,
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from a variable lookup, ignoring unparsable values
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = lookup(Self::ENV_SEED) {
            match seed.parse::<u64>() {
                Ok(parsed) => self.seed = Some(parsed),
                Err(_) => log::warn!("Invalid {} '{}', ignoring", Self::ENV_SEED, seed),
            }
        }

        if let Some(speed) = lookup(Self::ENV_BALL_SPEED) {
            match speed.parse::<f32>() {
                Ok(parsed) => self.tuning.initial_ball_speed = parsed,
                Err(_) => log::warn!("Invalid {} '{}', ignoring", Self::ENV_BALL_SPEED, speed),
            }
        }

        if let Some(speed) = lookup(Self::ENV_MAX_BALL_SPEED) {
            match speed.parse::<f32>() {
                Ok(parsed) => self.tuning.max_ball_speed = parsed,
                Err(_) => log::warn!(
                    "Invalid {} '{}', ignoring",
                    Self::ENV_MAX_BALL_SPEED,
                    speed
                ),
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let tuning = &self.tuning;
        if !(MIN_INITIAL_BALL_SPEED..=MAX_INITIAL_BALL_SPEED).contains(&tuning.initial_ball_speed)
        {
            return Err(SettingsError::Invalid(format!(
                "initial_ball_speed {} outside {}..={}",
                tuning.initial_ball_speed, MIN_INITIAL_BALL_SPEED, MAX_INITIAL_BALL_SPEED
            )));
        }
        if !tuning.max_ball_speed.is_finite() || tuning.max_ball_speed < tuning.min_speed_cap() {
            return Err(SettingsError::Invalid(format!(
                "max_ball_speed {} below {} needed for initial_ball_speed {}",
                tuning.max_ball_speed,
                tuning.min_speed_cap(),
                tuning.initial_ball_speed
            )));
        }
        if tuning.reset_delay_ticks == 0 {
            return Err(SettingsError::Invalid(
                "reset_delay_ticks must be at least 1".to_string(),
            ));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"seed": 7, "tuning": {"initial_ball_speed": 5.0}}"#)
            .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.initial_ball_speed, 5.0);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_rejects_out_of_range_speed() {
        let err = Settings::from_json(r#"{"tuning": {"initial_ball_speed": 9.0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_cap_below_serve_speed() {
        let err = Settings::from_json(r#"{"tuning": {"max_ball_speed": 2.0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_cap_equal_to_serve_speed() {
        // Diagonal serves and tip deflections would exceed this cap
        let err = Settings::from_json(
            r#"{"tuning": {"initial_ball_speed": 5.0, "max_ball_speed": 5.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let ok = Settings::from_json(
            r#"{"tuning": {"initial_ball_speed": 5.0, "max_ball_speed": 9.1}}"#,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env(|key| match key {
            "PONG_SEED" => Some("1234".to_string()),
            "PONG_BALL_SPEED" => Some("fast".to_string()),
            "PONG_MAX_BALL_SPEED" => Some("20".to_string()),
            _ => None,
        });
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.tuning.initial_ball_speed, MIN_INITIAL_BALL_SPEED);
        assert_eq!(settings.tuning.max_ball_speed, 20.0);
    }

    #[test]
    fn test_resolve_seed_prefers_configured() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 42);
    }
}
