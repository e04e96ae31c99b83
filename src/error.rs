// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and the user-facing notifications they map to.

use crate::controller::form::ValidationError;
use crate::db::StorageError;
use crate::services::GeolocationError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error("Map is not loaded yet")]
    MapUnavailable,
}

impl AppError {
    /// Text for the blocking notification shown to the user, or `None` for
    /// errors that are handled silently.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::Validation(
                ValidationError::MissingLocation | ValidationError::InvalidLocation,
            ) => {
                Some("Click on the map to choose a location first".to_string())
            }
            AppError::Validation(_) => Some("Input have to be positive number".to_string()),
            AppError::NotFound(_) => None,
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                Some("Your workouts could not be saved".to_string())
            }
            AppError::Geolocation(_) => Some("Could not get current position".to_string()),
            AppError::MapUnavailable => Some("The map is still loading".to_string()),
        }
    }
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AppError>;
