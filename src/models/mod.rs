// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod marker;
pub mod workout;

pub use marker::{MarkerHandle, MarkerLayer, MarkerSpec, PanOptions};
pub use workout::{Coords, Metric, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
