// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authoritative workout collection with persistence.
//!
//! The in-memory sequence is the source of truth; every mutation rewrites
//! the whole sequence to the key/value substrate under `keys::WORKOUTS`.
//! Only entity records go through this path. Presentation handles live in
//! the synchronizer and are never written here.

use crate::db::keys;
use crate::db::storage::{KeyValueStore, StorageError};
use crate::models::{Workout, WorkoutId};
use serde_json::Value;
use std::collections::HashSet;

/// Ordered workout collection (insertion order = display order).
pub struct WorkoutStore<S> {
    storage: S,
    workouts: Vec<Workout>,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    /// Create an empty store over `storage`. Call `restore()` to load.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            workouts: Vec::new(),
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a workout and persist. No dedup.
    pub fn add(&mut self, workout: Workout) -> Result<(), StorageError> {
        tracing::info!(id = %workout.id(), kind = %workout.kind(), "Workout added");
        self.workouts.push(workout);
        self.persist()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    /// Remove the workout with `id` and persist.
    ///
    /// Returns `Ok(None)` without touching storage if `id` is absent.
    pub fn remove_by_id(&mut self, id: &str) -> Result<Option<Workout>, StorageError> {
        let Some(index) = self.workouts.iter().position(|w| w.id().as_str() == id) else {
            tracing::debug!(id, "Workout not found for removal");
            return Ok(None);
        };

        let removed = self.workouts.remove(index);
        tracing::info!(id, "Workout removed");
        self.persist()?;
        Ok(Some(removed))
    }

    /// Remove every workout and persist an empty sequence.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        tracing::info!(count = self.workouts.len(), "Clearing workouts");
        self.workouts.clear();
        self.persist()
    }

    /// Write the full sequence to storage.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.workouts)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        self.storage.set(keys::WORKOUTS, &payload).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist workouts");
            e
        })
    }

    /// Read the persisted sequence.
    ///
    /// Never fails: an absent key, an unreadable substrate or a payload
    /// that is not a JSON array all yield an empty sequence. Individual
    /// records that cannot be decoded (unknown `type`, missing fields) are
    /// skipped, as is any record repeating an earlier record's id; the
    /// first one wins.
    pub fn load(&self) -> Vec<Workout> {
        let payload = match self.storage.get(keys::WORKOUTS) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read workouts, starting empty");
                return Vec::new();
            }
        };

        let records: Vec<Value> = match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed workouts payload, starting empty");
                return Vec::new();
            }
        };

        let total = records.len();
        let mut seen: HashSet<WorkoutId> = HashSet::new();
        let workouts: Vec<Workout> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                match serde_json::from_value::<Workout>(record) {
                    Ok(workout) if !seen.insert(workout.id().clone()) => {
                        tracing::warn!(
                            index,
                            id = %workout.id(),
                            "Skipping duplicate workout id"
                        );
                        None
                    }
                    Ok(workout) => Some(workout),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Skipping malformed workout record");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(loaded = workouts.len(), total, "Loaded workouts");
        workouts
    }

    /// Replace the in-memory sequence with the persisted one.
    pub fn restore(&mut self) -> &[Workout] {
        self.workouts = self.load();
        &self.workouts
    }
}
