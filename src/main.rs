// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Mapper terminal front end.
//!
//! Restores saved workouts, starts the position lookup in the background,
//! and reads commands from stdin. The map loads as soon as the position
//! arrives; until then the list is usable but new workouts cannot be placed.

use anyhow::Context;
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_mapper::{
    config::Config,
    console::{self, Command, ConsolePrompt, Flow, Input},
    db::{FileStorage, WorkoutStore},
    services::{HtmlList, InMemoryMap, Locator, PresentationSync},
    App,
};

/// How often the command loop wakes up to check for the position while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logs on stderr; stdout is the UI
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(path = %config.storage_path.display(), "Starting Workout Mapper");

    let storage = FileStorage::open(&config.storage_path);
    let store = WorkoutStore::new(storage);
    let sync = PresentationSync::new(HtmlList::new(), config.highlight_duration);
    let lines = console::spawn_stdin_reader();
    let mut app = App::new(&config, store, sync, ConsolePrompt::new(lines.clone()));

    let restored = app.restore();
    println!("Workout Mapper: {} saved workout(s). Type 'help' for commands.", restored);

    // Position lookup runs in the background; the command loop checks for
    // its single result whenever a line arrives or the wait times out.
    let locator = Locator::from_config(&config);
    let (tx, mut position) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(locator.locate().await);
    });

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        let mut map_pending = true;

        loop {
            if map_pending {
                match position.try_recv() {
                    Ok(Ok(coords)) => {
                        app.load_map(InMemoryMap::new(), coords);
                        println!("Map loaded at {}", coords);
                        map_pending = false;
                    }
                    Ok(Err(e)) => {
                        app.position_failed(e);
                        map_pending = false;
                    }
                    Err(oneshot::error::TryRecvError::Empty) => {}
                    Err(oneshot::error::TryRecvError::Closed) => map_pending = false,
                }
            }

            let line = match console::next_input(&lines, POLL_INTERVAL) {
                Input::Line(line) => line,
                Input::Idle => continue,
                Input::Closed => break,
            };

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };

            if console::execute(&mut app, command, &mut stdout)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    })
    .await
    .context("Console task panicked")??;

    tracing::info!("Shutting down");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_mapper=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
