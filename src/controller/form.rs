// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entry form: raw text input, visibility state and validation.
//!
//! Numeric fields arrive as raw text and are read the way a browser's unary
//! `+` reads them: surrounding whitespace is ignored and empty text is 0.
//! So an empty elevation is a valid 0, while an empty distance fails the
//! positivity check.

use crate::models::{Coords, Metric, WorkoutKind};

/// Raw form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Input that passed validation; ready for entity construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedWorkout {
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub metric: Metric,
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown workout type: {0:?}")]
    UnknownKind(String),

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("{0} must be a whole number")]
    NotWhole(&'static str),

    #[error("No map location selected")]
    MissingLocation,

    #[error("Map location out of range")]
    InvalidLocation,
}

impl WorkoutForm {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: WorkoutKind::Running.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: WorkoutKind::Cycling.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }

    /// Clear every numeric input; the type selector keeps its value.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    /// Validate against the clicked location.
    ///
    /// distance and duration must be finite and positive. Running cadence
    /// must be a finite, positive whole number. Cycling elevation only has
    /// to be finite; zero and negative gains are accepted. The derived pace
    /// or speed must also be finite, and the location must be a real
    /// coordinate, so that the stored record reads back intact.
    pub fn validate(&self, coords: Option<Coords>) -> Result<ValidatedWorkout, ValidationError> {
        let kind: WorkoutKind = self
            .kind
            .parse()
            .map_err(|_| ValidationError::UnknownKind(self.kind.clone()))?;

        let distance = positive("distance", read_number(&self.distance))?;
        let duration = positive("duration", read_number(&self.duration))?;

        let metric = match kind {
            WorkoutKind::Running => {
                let cadence = positive("cadence", read_number(&self.cadence))?;
                if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
                    return Err(ValidationError::NotWhole("cadence"));
                }
                Metric::Cadence(cadence as u32)
            }
            WorkoutKind::Cycling => {
                Metric::ElevationGain(finite("elevation", read_number(&self.elevation))?)
            }
        };

        match metric {
            Metric::Cadence(_) => finite("pace", metric.derived(distance, duration))?,
            Metric::ElevationGain(_) => finite("speed", metric.derived(distance, duration))?,
        };

        let coords = coords.ok_or(ValidationError::MissingLocation)?;
        if !coords.is_valid() {
            return Err(ValidationError::InvalidLocation);
        }

        Ok(ValidatedWorkout {
            coords,
            distance,
            duration,
            metric,
        })
    }
}

/// Parse raw text; empty is 0, garbage is NaN.
fn read_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite(field))
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

/// Which metric input is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Cadence,
    Elevation,
}

impl MetricField {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => MetricField::Cadence,
            WorkoutKind::Cycling => MetricField::Elevation,
        }
    }
}

/// Form visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormState {
    pub visible: bool,
    pub metric_field: MetricField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            visible: false,
            metric_field: MetricField::Cadence,
        }
    }
}
