// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation synchronizer.
//!
//! Keeps the two projections of the workout collection (list rows and map
//! markers) in step with store mutations. Marker removal goes through the
//! id → handle side-table only; there is no positional correlation between
//! the store's sequence and the map's markers.
//!
//! The map is optional: the list can be shown before geolocation resolves,
//! and markers for every live workout are placed once a map is attached.

use crate::models::{
    Coords, MarkerHandle, MarkerLayer, MarkerSpec, PanOptions, Workout, WorkoutId,
};
use crate::services::list::{render_row, ListView};
use crate::services::map::MapView;
use std::collections::HashMap;
use std::time::Duration;

pub struct PresentationSync<M, L> {
    map: Option<M>,
    list: L,
    markers: HashMap<WorkoutId, MarkerHandle>,
    highlight: Duration,
}

impl<M: MapView, L: ListView> PresentationSync<M, L> {
    pub fn new(list: L, highlight: Duration) -> Self {
        Self {
            map: None,
            list,
            markers: HashMap::new(),
            highlight,
        }
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut M> {
        self.map.as_mut()
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Handle registered for `id`, if any.
    pub fn marker_for(&self, id: &WorkoutId) -> Option<MarkerHandle> {
        self.markers.get(id).copied()
    }

    /// Workout owning `handle`, if it is one of ours.
    pub fn workout_for_marker(&self, handle: MarkerHandle) -> Option<&WorkoutId> {
        self.markers
            .iter()
            .find(|(_, h)| **h == handle)
            .map(|(id, _)| id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Attach a map and place markers for `workouts`.
    ///
    /// Handles registered against a previous map are dropped first.
    pub fn attach_map(&mut self, map: M, workouts: &[Workout]) {
        self.markers.clear();
        self.map = Some(map);
        for workout in workouts {
            self.render_marker(workout);
        }
        tracing::debug!(markers = self.markers.len(), "Map attached");
    }

    /// Place the marker for `workout` and record its handle.
    ///
    /// Returns `None` when no map is attached yet. Re-rendering a workout
    /// replaces its previous marker.
    pub fn render_marker(&mut self, workout: &Workout) -> Option<MarkerHandle> {
        let map = self.map.as_mut()?;

        if let Some(stale) = self.markers.remove(workout.id()) {
            map.remove_marker(stale);
        }

        let handle = map.add_marker(MarkerSpec::for_workout(workout), MarkerLayer::Workouts);
        self.markers.insert(workout.id().clone(), handle);
        Some(handle)
    }

    pub fn render_list_row(&mut self, workout: &Workout) {
        self.list.insert_row(workout.id(), render_row(workout));
    }

    /// Render both projections of a new workout.
    pub fn render(&mut self, workout: &Workout) -> Option<MarkerHandle> {
        self.render_list_row(workout);
        self.render_marker(workout)
    }

    /// Remove the row and marker for `id`. Absent ids are a no-op.
    pub fn remove_one(&mut self, id: &WorkoutId) {
        let row_removed = self.list.remove_row(id);

        let marker_removed = match (self.markers.remove(id), self.map.as_mut()) {
            (Some(handle), Some(map)) => map.remove_marker(handle),
            _ => false,
        };

        tracing::debug!(%id, row_removed, marker_removed, "Removed workout presentation");
    }

    /// Remove every row and every workout marker.
    pub fn remove_all(&mut self) {
        self.list.clear();
        if let Some(map) = self.map.as_mut() {
            map.clear_layer(MarkerLayer::Workouts);
        }
        self.markers.clear();
    }

    /// Center the map on `coords`, keeping the zoom.
    pub fn recenter(&mut self, coords: Coords) {
        if let Some(map) = self.map.as_mut() {
            map.set_view(coords, None, None);
        }
    }

    /// Re-center on a workout and pulse its row (marker click).
    pub fn focus(&mut self, id: &WorkoutId, coords: Coords) {
        self.recenter(coords);
        self.list.pulse(id, self.highlight);
    }

    /// Pan to `coords` at `zoom` (list click).
    pub fn pan_to(&mut self, coords: Coords, zoom: u8, pan: PanOptions) -> bool {
        match self.map.as_mut() {
            Some(map) => {
                map.set_view(coords, Some(zoom), Some(pan));
                true
            }
            None => false,
        }
    }
}
