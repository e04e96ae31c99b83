// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::Coords;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// File backing the durable key/value store
    pub storage_path: PathBuf,
    /// Zoom level used when the map opens and when panning to a workout
    pub map_zoom_level: u8,
    /// How long a list row stays highlighted after its marker is clicked
    pub highlight_duration: Duration,
    /// Pan animation duration when a list row is clicked
    pub pan_duration: Duration,
    /// Fixed answer for geolocation
    pub home_position: Option<Coords>,
    /// IP geolocation endpoint
    pub geolocation_url: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("workouts.json"),
            map_zoom_level: 14,
            highlight_duration: Duration::from_millis(1200),
            pan_duration: Duration::from_millis(1000),
            home_position: None,
            geolocation_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let home_position = match (env::var("HOME_LAT"), env::var("HOME_LNG")) {
            (Ok(lat), Ok(lng)) => Some(Coords::new(
                parse_coordinate("HOME_LAT", &lat, 90.0)?,
                parse_coordinate("HOME_LNG", &lng, 180.0)?,
            )),
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("HOME_LNG")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("HOME_LAT")),
            (Err(_), Err(_)) => None,
        };

        Ok(Self {
            storage_path: env::var("WORKOUT_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            map_zoom_level: optional_var("MAP_ZOOM_LEVEL")?.unwrap_or(defaults.map_zoom_level),
            highlight_duration: optional_var("HIGHLIGHT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.highlight_duration),
            pan_duration: optional_var("PAN_DURATION_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.pan_duration),
            home_position,
            geolocation_url: env::var("GEOLOCATION_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

fn optional_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_var(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(name, value.to_string()))
}

/// Parse a latitude or longitude, rejecting NaN and anything outside
/// `-limit..=limit`.
fn parse_coordinate(name: &'static str, value: &str, limit: f64) -> Result<f64, ConfigError> {
    let degrees: f64 = parse_var(name, value)?;
    if (-limit..=limit).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(ConfigError::Invalid(name, value.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutations don't race between test threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("MAP_ZOOM_LEVEL", "12");
        env::set_var("HIGHLIGHT_MS", "500");
        env::set_var("HOME_LAT", "40.7");
        env::set_var("HOME_LNG", "-74.0");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.map_zoom_level, 12);
        assert_eq!(config.highlight_duration, Duration::from_millis(500));
        assert_eq!(config.pan_duration, Duration::from_millis(1000));
        assert_eq!(config.home_position, Some(Coords::new(40.7, -74.0)));

        env::set_var("MAP_ZOOM_LEVEL", "far");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAP_ZOOM_LEVEL", _))
        ));
        env::remove_var("MAP_ZOOM_LEVEL");

        env::set_var("HOME_LAT", "nan");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("HOME_LAT", _))
        ));
        env::set_var("HOME_LAT", "40.7");
        env::set_var("HOME_LNG", "200");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("HOME_LNG", _))
        ));

        env::remove_var("HOME_LNG");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("HOME_LNG"))
        ));

        env::remove_var("HOME_LAT");
        env::remove_var("HIGHLIGHT_MS");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.home_position, None);
        assert_eq!(config.map_zoom_level, 14);
    }
}
