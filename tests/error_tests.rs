// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_mapper::controller::form::ValidationError;
use workout_mapper::db::StorageError;
use workout_mapper::error::AppError;
use workout_mapper::services::GeolocationError;

#[test]
fn test_validation_messages() {
    let err = AppError::from(ValidationError::NotPositive("distance"));
    assert_eq!(
        err.user_message().as_deref(),
        Some("Input have to be positive number")
    );

    let err = AppError::from(ValidationError::NotFinite("distance"));
    assert_eq!(
        err.user_message().as_deref(),
        Some("Input have to be positive number")
    );

    let err = AppError::from(ValidationError::MissingLocation);
    assert_eq!(
        err.user_message().as_deref(),
        Some("Click on the map to choose a location first")
    );

    let err = AppError::from(ValidationError::InvalidLocation);
    assert_eq!(
        err.user_message().as_deref(),
        Some("Click on the map to choose a location first")
    );
}

#[test]
fn test_not_found_is_silent() {
    let err = AppError::NotFound("123".to_string());
    assert!(err.user_message().is_none());
    assert_eq!(err.to_string(), "Workout not found: 123");
}

#[test]
fn test_storage_and_position_messages() {
    let err = AppError::from(StorageError::Io("disk full".to_string()));
    assert_eq!(
        err.user_message().as_deref(),
        Some("Your workouts could not be saved")
    );

    let err = AppError::from(GeolocationError::Unavailable);
    assert_eq!(
        err.user_message().as_deref(),
        Some("Could not get current position")
    );

    assert_eq!(
        AppError::MapUnavailable.user_message().as_deref(),
        Some("The map is still loading")
    );
}
