// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer (durable key/value substrate).

pub mod storage;
pub mod workouts;

pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use workouts::WorkoutStore;

/// Storage keys as constants.
pub mod keys {
    /// Ordered sequence of workout records (JSON array)
    pub const WORKOUTS: &str = "workouts";
    /// Marker metadata written by early versions; never written, removed on startup
    pub const LEGACY_MARKERS: &str = "markers";
}
