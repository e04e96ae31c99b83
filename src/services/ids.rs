// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout identifier generation.
//!
//! Ids keep the historical format (last 10 digits of the creation time in
//! milliseconds) but are strictly increasing: two workouts created in the
//! same millisecond, or a clock that steps backwards, bump the id by one
//! instead of colliding. Ids already in storage are fed back in with
//! `observe()` so new ids never repeat them.

use crate::models::WorkoutId;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

const ID_MODULUS: u64 = 10_000_000_000;

#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
    issued: HashSet<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the id for a workout created at `now`.
    ///
    /// Past `9999999999` the counter wraps to zero and skips any value
    /// already issued or observed.
    pub fn next(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let candidate = now.timestamp_millis().unsigned_abs() % ID_MODULUS;
        let mut value = match self.last {
            Some(last) if candidate <= last => (last + 1) % ID_MODULUS,
            _ => candidate,
        };
        while self.issued.contains(&value) {
            value = (value + 1) % ID_MODULUS;
        }

        self.last = Some(value);
        self.issued.insert(value);
        WorkoutId::new(format!("{:010}", value))
    }

    /// Record an existing id so it is never issued again.
    ///
    /// Non-numeric ids, and numbers wider than ten digits, cannot collide
    /// with generated ones and are ignored.
    pub fn observe(&mut self, id: &WorkoutId) {
        match id.as_str().parse::<u64>() {
            Ok(value) if value < ID_MODULUS => {
                self.last = Some(self.last.map_or(value, |last| last.max(value)));
                self.issued.insert(value);
            }
            _ => tracing::debug!(%id, "Ignoring non-generated workout id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_is_last_ten_digits() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        assert_eq!(ids.next(now).as_str(), "8000000123");
    }

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        let a = ids.next(now);
        let b = ids.next(now);
        assert_ne!(a, b);
        assert_eq!(b.as_str(), "8000000124");
    }

    #[test]
    fn test_zero_padded() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_042).unwrap();
        let id = ids.next(now);
        assert_eq!(id.as_str().len(), 10);
        assert_eq!(id.as_str(), "0000000042");
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let mut ids = IdGenerator::new();
        ids.observe(&WorkoutId::from("9000000000"));
        ids.observe(&WorkoutId::from("legacy-id"));

        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        assert_eq!(ids.next(now).as_str(), "9000000001");
    }

    #[test]
    fn test_oversized_ids_are_ignored() {
        let mut ids = IdGenerator::new();
        ids.observe(&WorkoutId::from("18446744073709551615"));
        ids.observe(&WorkoutId::from("12345678901"));

        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        assert_eq!(ids.next(now).as_str(), "8000000123");
    }

    #[test]
    fn test_bump_wraps_within_ten_digits() {
        let mut ids = IdGenerator::new();
        ids.observe(&WorkoutId::from("0000000000"));
        ids.observe(&WorkoutId::from("8000000123"));
        ids.observe(&WorkoutId::from("9999999999"));

        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        let id = ids.next(now);
        assert_eq!(id.as_str(), "0000000001");
        assert_eq!(ids.next(now).as_str(), "8000000124");
    }
}
