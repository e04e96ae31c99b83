// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::VecDeque;
use workout_mapper::config::Config;
use workout_mapper::controller::UserPrompt;
use workout_mapper::db::{KeyValueStore, MemoryStorage, StorageError, WorkoutStore};
use workout_mapper::models::{Coords, Workout, WorkoutId};
use workout_mapper::services::{HtmlList, InMemoryMap, PresentationSync};
use workout_mapper::App;

/// Prompt that answers confirmations from a script and records alerts.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub questions: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl UserPrompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        // Unscripted questions are declined
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Storage that serves what it was seeded with but rejects every write.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyStorage {
    inner: MemoryStorage,
}

#[allow(dead_code)]
impl ReadOnlyStorage {
    pub fn seeded(inner: MemoryStorage) -> Self {
        Self { inner }
    }
}

impl KeyValueStore for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only".to_string()))
    }
}

#[allow(dead_code)]
pub type TestApp<S = MemoryStorage> = App<S, InMemoryMap, HtmlList, ScriptedPrompt>;

/// Where test workouts are placed.
#[allow(dead_code)]
pub const NEW_YORK: Coords = Coords {
    lat: 40.7,
    lng: -74.0,
};

/// Build an app over `storage` without restoring or loading the map.
#[allow(dead_code)]
pub fn app_with<S: KeyValueStore>(storage: S, answers: &[bool]) -> TestApp<S> {
    let config = Config::default();
    let sync = PresentationSync::new(HtmlList::new(), config.highlight_duration);
    App::new(
        &config,
        WorkoutStore::new(storage),
        sync,
        ScriptedPrompt::answering(answers),
    )
}

/// Build an app over `storage`, restore it and load the map at NEW_YORK.
#[allow(dead_code)]
pub fn ready_app_with<S: KeyValueStore>(storage: S, answers: &[bool]) -> TestApp<S> {
    let mut app = app_with(storage, answers);
    app.restore();
    app.load_map(InMemoryMap::new(), NEW_YORK);
    app
}

#[allow(dead_code)]
pub fn ready_app(answers: &[bool]) -> TestApp {
    ready_app_with(MemoryStorage::new(), answers)
}

/// A fixed creation time (UTC-5).
#[allow(dead_code)]
pub fn april_14() -> DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 4, 14, 18, 30, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn running(id: &str) -> Workout {
    Workout::running(WorkoutId::from(id), april_14(), NEW_YORK, 5.0, 25.0, 180)
}

#[allow(dead_code)]
pub fn cycling(id: &str) -> Workout {
    Workout::cycling(WorkoutId::from(id), april_14(), NEW_YORK, 20.0, 60.0, -5.0)
}
