// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction controller.
//!
//! Receives user and map events and drives the store and the presentation
//! synchronizer. All collaborators are handed in at construction.
//!
//! Every mutation follows the same order: store first, then presentation.
//! A persistence failure is reported to the user but does not roll back the
//! in-memory change, so the store, list and map never disagree.

pub mod form;
pub mod prompt;

use crate::config::Config;
use crate::db::{keys, KeyValueStore, WorkoutStore};
use crate::error::{AppError, Result};
use crate::models::{
    Coords, MarkerHandle, MarkerLayer, MarkerSpec, PanOptions, Workout, WorkoutId, WorkoutKind,
};
use crate::services::{GeolocationError, IdGenerator, ListView, MapView, PresentationSync};
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::time::Duration;

pub use form::{FormState, MetricField, ValidatedWorkout, ValidationError, WorkoutForm};
pub use prompt::UserPrompt;

const CONFIRM_DELETE_ONE: &str = "Delete this workout?";
const CONFIRM_DELETE_ALL: &str = "Delete all workouts?";

/// Where a click on a list row landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row,
    DismissControl,
}

pub struct App<S, M, L, P> {
    store: WorkoutStore<S>,
    sync: PresentationSync<M, L>,
    prompt: P,
    ids: IdGenerator,
    form: FormState,
    pending_coords: Option<Coords>,
    home: Option<(MarkerHandle, Coords)>,
    zoom: u8,
    pan_duration: Duration,
}

impl<S, M, L, P> App<S, M, L, P>
where
    S: KeyValueStore,
    M: MapView,
    L: ListView,
    P: UserPrompt,
{
    pub fn new(
        config: &Config,
        store: WorkoutStore<S>,
        sync: PresentationSync<M, L>,
        prompt: P,
    ) -> Self {
        Self {
            store,
            sync,
            prompt,
            ids: IdGenerator::new(),
            form: FormState::default(),
            pending_coords: None,
            home: None,
            zoom: config.map_zoom_level,
            pan_duration: config.pan_duration,
        }
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    pub fn sync(&self) -> &PresentationSync<M, L> {
        &self.sync
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn form_state(&self) -> FormState {
        self.form
    }

    pub fn pending_coords(&self) -> Option<Coords> {
        self.pending_coords
    }

    pub fn home_marker(&self) -> Option<MarkerHandle> {
        self.home.map(|(handle, _)| handle)
    }

    // ─── Startup ─────────────────────────────────────────────────

    /// Load persisted workouts and render them.
    ///
    /// Returns the number of workouts restored.
    pub fn restore(&mut self) -> usize {
        for workout in self.store.restore() {
            self.ids.observe(workout.id());
            self.sync.render(workout);
        }

        if let Err(e) = self.store.storage_mut().remove(keys::LEGACY_MARKERS) {
            tracing::warn!(error = %e, "Failed to remove legacy marker metadata");
        }

        tracing::info!(count = self.store.len(), "Workouts restored");
        self.store.len()
    }

    /// Show the map centered on `position` and place every workout marker.
    pub fn load_map(&mut self, mut map: M, position: Coords) {
        map.set_view(position, Some(self.zoom), None);
        let handle = map.add_marker(MarkerSpec::current_position(position), MarkerLayer::Base);
        self.home = Some((handle, position));

        self.sync.attach_map(map, self.store.workouts());
        tracing::info!(lat = position.lat, lng = position.lng, "Map loaded");
    }

    /// Geolocation failed: tell the user. The map never loads.
    pub fn position_failed(&mut self, error: GeolocationError) {
        tracing::warn!(error = %error, "Geolocation failed");
        self.report(AppError::from(error));
    }

    // ─── Form ────────────────────────────────────────────────────

    /// A click on the map opens the form anchored to `coords`.
    pub fn on_map_click(&mut self, coords: Coords) -> Result<()> {
        if !self.sync.has_map() {
            return Err(AppError::MapUnavailable);
        }
        if !coords.is_valid() {
            return Err(ValidationError::InvalidLocation.into());
        }
        self.pending_coords = Some(coords);
        self.form.visible = true;
        Ok(())
    }

    /// Switching the type selector swaps the cadence and elevation inputs.
    pub fn on_type_change(&mut self, kind: WorkoutKind) {
        self.form.metric_field = MetricField::for_kind(kind);
    }

    /// Submit the form at the current local time.
    pub fn on_submit(&mut self, form: &mut WorkoutForm) -> Result<WorkoutId> {
        self.submit_at(form, Local::now().fixed_offset())
    }

    /// Submit the form as if it were `now`.
    ///
    /// On rejection the user is alerted and the form is left as typed. On
    /// success the workout is stored and rendered, the inputs are cleared
    /// and the form is hidden.
    pub fn submit_at(
        &mut self,
        form: &mut WorkoutForm,
        now: DateTime<FixedOffset>,
    ) -> Result<WorkoutId> {
        let input = match form.validate(self.pending_coords) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected workout input");
                let err = AppError::from(e);
                self.report_ref(&err);
                return Err(err);
            }
        };

        let id = self.ids.next(now.with_timezone(&Utc));
        let workout = Workout::new(
            id.clone(),
            now,
            input.coords,
            input.distance,
            input.duration,
            input.metric,
        );

        let added = self.store.add(workout.clone());
        self.sync.render(&workout);
        if let Err(e) = added {
            self.report(e.into());
        }

        form.clear();
        self.form.visible = false;
        self.pending_coords = None;
        Ok(id)
    }

    // ─── Deletion ────────────────────────────────────────────────

    /// Delete one workout after confirmation.
    ///
    /// Returns `Ok(false)` if the user declined, `Err(NotFound)` (silent)
    /// if `id` is not a live workout.
    pub fn on_delete_one(&mut self, id: &str) -> Result<bool> {
        let Some(workout) = self.store.find_by_id(id) else {
            return Err(AppError::NotFound(id.to_string()));
        };
        let id = workout.id().clone();

        if !self.prompt.confirm(CONFIRM_DELETE_ONE) {
            return Ok(false);
        }

        let removed = self.store.remove_by_id(id.as_str());
        self.sync.remove_one(&id);
        if let Err(e) = removed {
            self.report(e.into());
        }
        Ok(true)
    }

    /// Delete every workout after confirmation.
    ///
    /// Returns `Ok(false)` if there was nothing to delete or the user
    /// declined.
    pub fn on_delete_all(&mut self) -> Result<bool> {
        if self.store.is_empty() {
            return Ok(false);
        }

        if !self.prompt.confirm(CONFIRM_DELETE_ALL) {
            return Ok(false);
        }

        let cleared = self.store.clear();
        self.sync.remove_all();
        if let Err(e) = cleared {
            self.report(e.into());
        }
        Ok(true)
    }

    // ─── Navigation ──────────────────────────────────────────────

    /// A click on a list row pans the map to that workout.
    ///
    /// Clicks on the dismiss control, on unknown ids, or before the map
    /// is loaded are ignored.
    pub fn on_list_item_click(&mut self, id: &str, target: ClickTarget) -> Option<Coords> {
        if target == ClickTarget::DismissControl {
            return None;
        }

        let coords = self.store.find_by_id(id)?.coords();
        let pan = PanOptions {
            animate: true,
            duration: self.pan_duration,
        };
        self.sync.pan_to(coords, self.zoom, pan).then_some(coords)
    }

    /// A click on a marker re-centers on it and pulses its list row.
    ///
    /// Returns the workout id, or `None` for the position marker and
    /// unknown handles.
    pub fn on_marker_click(&mut self, handle: MarkerHandle) -> Option<WorkoutId> {
        if let Some((home, position)) = self.home {
            if home == handle {
                self.sync.recenter(position);
                return None;
            }
        }

        let id = self.sync.workout_for_marker(handle)?.clone();
        let coords = self.store.find_by_id(id.as_str())?.coords();
        self.sync.focus(&id, coords);
        Some(id)
    }

    // ─── Notifications ───────────────────────────────────────────

    /// Show the user-facing message for `err`, if it has one.
    pub fn report(&mut self, err: AppError) {
        self.report_ref(&err);
    }

    fn report_ref(&mut self, err: &AppError) {
        if let Some(message) = err.user_message() {
            self.prompt.alert(&message);
        }
    }
}
