//! Configuration module - environment variable parsing
//!
//! Gameplay tuning is compiled in (`BASE_STATS`, `MatchRules::STANDARD`);
//! only deployment details come from the environment.

use std::env;
use std::path::PathBuf;

const ASSETS_VAR: &str = "RUSTED_DUEL_ASSETS";
const WIDTH_VAR: &str = "RUSTED_DUEL_WIDTH";
const HEIGHT_VAR: &str = "RUSTED_DUEL_HEIGHT";

/// Runtime configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Directory holding sprite sheets, hearts and the background
    pub asset_dir: PathBuf,
    /// Initial window width in logical pixels
    pub window_width: u32,
    /// Initial window height in logical pixels
    pub window_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl GameConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            asset_dir: lookup(ASSETS_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            window_width: parse_dimension(WIDTH_VAR, lookup(WIDTH_VAR))?
                .unwrap_or(defaults.window_width),
            window_height: parse_dimension(HEIGHT_VAR, lookup(HEIGHT_VAR))?
                .unwrap_or(defaults.window_height),
        })
    }
}

fn parse_dimension(key: &'static str, raw: Option<String>) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidDimension { key, value: raw }),
        Ok(value) => Ok(Some(value)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidDimension { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert_eq!((config.window_width, config.window_height), (1280, 720));
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup(&[
            (ASSETS_VAR, "/opt/duel/art"),
            (WIDTH_VAR, "800"),
            (HEIGHT_VAR, " 600 "),
        ]))
        .unwrap();

        assert_eq!(config.asset_dir, PathBuf::from("/opt/duel/art"));
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
    }

    #[test]
    fn test_invalid_dimensions() {
        for bad in ["wide", "0", "-5", ""] {
            let err = GameConfig::from_lookup(lookup(&[(WIDTH_VAR, bad)])).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidDimension { key: WIDTH_VAR, .. }
            ));
        }
    }

    #[test]
    fn test_error_message() {
        let err = GameConfig::from_lookup(lookup(&[(HEIGHT_VAR, "tall")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "RUSTED_DUEL_HEIGHT must be a positive integer, got \"tall\""
        );
    }
}
