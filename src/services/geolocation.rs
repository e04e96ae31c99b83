// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot position lookup.
//!
//! The lookup either yields a coordinate pair or fails. There is no
//! timeout; callers must not block the UI on it.

use crate::config::Config;
use crate::models::Coords;
use serde::Deserialize;

/// Where the current position comes from.
#[derive(Debug, Clone)]
pub enum Locator {
    /// Fixed position from configuration
    Fixed(Coords),
    /// IP geolocation endpoint returning JSON with lat/lon
    Http { client: reqwest::Client, url: String },
    /// No position source available
    Unavailable,
}

/// IP geolocation response. Accepts both `lat`/`lon` and
/// `latitude`/`longitude` field names.
#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

impl Locator {
    /// Pick the locator configured in `config`.
    ///
    /// A fixed position wins over an HTTP endpoint.
    pub fn from_config(config: &Config) -> Self {
        if let Some(coords) = config.home_position {
            Locator::Fixed(coords)
        } else if let Some(url) = &config.geolocation_url {
            Locator::Http {
                client: reqwest::Client::new(),
                url: url.clone(),
            }
        } else {
            Locator::Unavailable
        }
    }

    pub async fn locate(&self) -> Result<Coords, GeolocationError> {
        match self {
            Locator::Fixed(coords) if coords.is_valid() => Ok(*coords),
            Locator::Fixed(coords) => Err(GeolocationError::Response(format!(
                "coordinates out of range: {}",
                coords
            ))),
            Locator::Http { client, url } => {
                tracing::debug!(url = %url, "Requesting IP geolocation");
                let location: IpLocation = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| GeolocationError::Request(e.to_string()))?
                    .json()
                    .await
                    .map_err(|e| GeolocationError::Response(e.to_string()))?;

                let coords = Coords::new(location.lat, location.lon);
                if !coords.is_valid() {
                    return Err(GeolocationError::Response(format!(
                        "coordinates out of range: {}",
                        coords
                    )));
                }
                tracing::info!(lat = coords.lat, lng = coords.lng, "Position acquired");
                Ok(coords)
            }
            Locator::Unavailable => Err(GeolocationError::Unavailable),
        }
    }
}

/// Errors from position lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("No position source configured")]
    Unavailable,

    #[error("Geolocation request failed: {0}")]
    Request(String),

    #[error("Invalid geolocation response: {0}")]
    Response(String),
}
