// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Mapper: log runs and rides where they happened.
//!
//! A workout is recorded by clicking a point on the map and filling in the
//! entry form. Each workout appears in three places that are kept in step:
//! the persisted store, the workout list, and a marker on the map.

pub mod config;
pub mod console;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use controller::App;
