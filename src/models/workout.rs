// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: the persisted entity and its two kinds.
//!
//! Derived values (`pace`, `speed`, `description`) are computed once at
//! construction and stored alongside the base fields, so a record read back
//! from storage carries them verbatim.

use crate::time_utils::format_month_day;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque workout identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WorkoutId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside latitude/longitude bounds.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coords> for geo::Point<f64> {
    fn from(c: Coords) -> Self {
        // geo uses (x, y) = (lng, lat)
        geo::Point::new(c.lng, c.lat)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Workout kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag used in storage, CSS classes and the form selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("unknown workout type: {}", other)),
        }
    }
}

/// Kind-specific payload, tagged by `type` in the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence: u32,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters; may be zero or negative
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

/// Kind-specific input metric, before derived values are computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Cadence(u32),
    ElevationGain(f64),
}

impl Metric {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Metric::Cadence(_) => WorkoutKind::Running,
            Metric::ElevationGain(_) => WorkoutKind::Cycling,
        }
    }

    /// Pace (min/km) for running, speed (km/h) for cycling.
    pub fn derived(&self, distance: f64, duration: f64) -> f64 {
        match self {
            Metric::Cadence(_) => duration / distance,
            Metric::ElevationGain(_) => distance / (duration / 60.0),
        }
    }
}

/// A recorded workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    /// Creation time, in the local offset at creation
    #[serde(rename = "date")]
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    description: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Build a workout from pre-validated input.
    ///
    /// Total: callers validate `distance`, `duration` and the metric first.
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        metric: Metric,
    ) -> Self {
        let derived = metric.derived(distance, duration);
        let details = match metric {
            Metric::Cadence(cadence) => WorkoutDetails::Running {
                cadence,
                pace: derived,
            },
            Metric::ElevationGain(elevation_gain) => WorkoutDetails::Cycling {
                elevation_gain,
                speed: derived,
            },
        };

        Self {
            description: describe(metric.kind(), &created_at),
            id,
            created_at,
            coords,
            distance,
            duration,
            details,
        }
    }

    pub fn running(
        id: WorkoutId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: u32,
    ) -> Self {
        Self::new(id, created_at, coords, distance, duration, Metric::Cadence(cadence))
    }

    pub fn cycling(
        id: WorkoutId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::new(
            id,
            created_at,
            coords,
            distance,
            duration,
            Metric::ElevationGain(elevation_gain),
        )
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => Some(cadence),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

/// "<Kind> on <Month> <Day>", e.g. "Running on April 14".
pub fn describe(kind: WorkoutKind, created_at: &DateTime<FixedOffset>) -> String {
    format!("{} on {}", kind.label(), format_month_day(created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_running_derives_pace() {
        let w = Workout::running(
            WorkoutId::from("1"),
            at(2024, 4, 14),
            Coords::new(40.7, -74.0),
            5.0,
            25.0,
            180,
        );
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert_eq!(w.pace(), Some(5.0));
        assert_eq!(w.cadence(), Some(180));
        assert_eq!(w.speed(), None);
        assert_eq!(w.description(), "Running on April 14");
    }

    #[test]
    fn test_cycling_derives_speed() {
        let w = Workout::cycling(
            WorkoutId::from("2"),
            at(2024, 12, 1),
            Coords::new(40.7, -74.0),
            20.0,
            60.0,
            -5.0,
        );
        assert_eq!(w.kind(), WorkoutKind::Cycling);
        assert_eq!(w.speed(), Some(20.0));
        assert_eq!(w.elevation_gain(), Some(-5.0));
        assert_eq!(w.pace(), None);
        assert_eq!(w.description(), "Cycling on December 1");
    }

    #[test]
    fn test_record_shape() {
        let w = Workout::running(
            WorkoutId::from("0123456789"),
            at(2024, 4, 14),
            Coords::new(40.7, -74.0),
            5.0,
            25.0,
            180,
        );
        let value = serde_json::to_value(&w).unwrap();

        assert_eq!(value["id"], "0123456789");
        assert_eq!(value["type"], "running");
        assert_eq!(value["coords"], serde_json::json!([40.7, -74.0]));
        assert_eq!(value["cadence"], 180);
        assert_eq!(value["pace"], 5.0);
        assert_eq!(value["description"], "Running on April 14");
        assert!(value["date"].is_string());
    }

    #[test]
    fn test_cycling_record_uses_camel_case_elevation() {
        let w = Workout::cycling(
            WorkoutId::from("1"),
            at(2024, 4, 14),
            Coords::new(0.0, 0.0),
            10.0,
            30.0,
            120.0,
        );
        let value = serde_json::to_value(&w).unwrap();
        assert_eq!(value["type"], "cycling");
        assert_eq!(value["elevationGain"], 120.0);
        assert_eq!(value["speed"], 20.0);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!(" cycling ".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn test_coords_validity() {
        assert!(Coords::new(40.7, -74.0).is_valid());
        assert!(Coords::new(-90.0, 180.0).is_valid());
        assert!(!Coords::new(f64::NAN, 0.0).is_valid());
        assert!(!Coords::new(0.0, f64::INFINITY).is_valid());
        assert!(!Coords::new(91.0, 0.0).is_valid());
        assert!(!Coords::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn test_coords_to_point_swaps_axes() {
        let p: geo::Point<f64> = Coords::new(40.7, -74.0).into();
        assert_eq!(p.x(), -74.0);
        assert_eq!(p.y(), 40.7);
    }
}
