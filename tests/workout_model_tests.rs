// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity construction: derived values and descriptions.

use chrono::{Datelike, FixedOffset, TimeZone};
use workout_mapper::models::workout::describe;
use workout_mapper::models::{Coords, Workout, WorkoutId, WorkoutKind};
use workout_mapper::time_utils::MONTHS;

mod common;

const DISTANCES: [f64; 6] = [0.1, 1.0, 5.0, 10.5, 42.195, 160.0];
const DURATIONS: [f64; 5] = [0.5, 12.0, 25.0, 61.5, 300.0];

#[test]
fn test_running_pace_is_duration_over_distance() {
    for &distance in &DISTANCES {
        for &duration in &DURATIONS {
            let w = Workout::running(
                WorkoutId::from("1"),
                common::april_14(),
                common::NEW_YORK,
                distance,
                duration,
                170,
            );
            assert_eq!(w.pace(), Some(duration / distance));
            assert!(w.description().contains("Running"));
        }
    }
}

#[test]
fn test_cycling_speed_is_km_per_hour() {
    for &distance in &DISTANCES {
        for &duration in &DURATIONS {
            let w = Workout::cycling(
                WorkoutId::from("1"),
                common::april_14(),
                common::NEW_YORK,
                distance,
                duration,
                0.0,
            );
            assert_eq!(w.speed(), Some(distance / (duration / 60.0)));
            assert!(w.description().starts_with("Cycling on "));
        }
    }
}

#[test]
fn test_description_uses_local_date_at_creation() {
    // 18:30 at UTC-5 on April 14 is already April 15 in UTC.
    let w = common::running("1");
    assert_eq!(w.description(), "Running on April 14");
}

#[test]
fn test_description_for_every_month() {
    let offset = FixedOffset::east_opt(0).unwrap();
    for (index, month) in MONTHS.iter().enumerate() {
        let date = offset
            .with_ymd_and_hms(2024, index as u32 + 1, 28, 12, 0, 0)
            .unwrap();
        assert_eq!(date.month0() as usize, index);
        assert_eq!(
            describe(WorkoutKind::Cycling, &date),
            format!("Cycling on {} 28", month)
        );
    }
}

#[test]
fn test_base_fields_kept_verbatim() {
    let w = common::cycling("abc");
    assert_eq!(w.id().as_str(), "abc");
    assert_eq!(w.coords(), Coords::new(40.7, -74.0));
    assert_eq!(w.distance(), 20.0);
    assert_eq!(w.duration(), 60.0);
    assert_eq!(w.elevation_gain(), Some(-5.0));
    assert_eq!(w.created_at(), &common::april_14());
}
