// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented terminal front end.
//!
//! Stands in for the browser page: each input line is one user or map
//! event, and the list and map are printed on request.

use crate::controller::{App, ClickTarget, UserPrompt, WorkoutForm};
use crate::db::KeyValueStore;
use crate::error::AppError;
use crate::models::{Coords, MarkerHandle, WorkoutKind};
use crate::services::list::detail_rows;
use crate::services::{InMemoryMap, ListView};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const HELP: &str = "\
Commands:
  click <lat> <lng>                          open the form at a map location
  type <running|cycling>                     switch the metric input
  submit <running|cycling> <km> <min> <x>    x = cadence (spm) or elevation gain (m)
  list                                       show workouts
  select <id>                                pan to a workout
  marker <handle>                            click a map marker
  delete <id>                                delete one workout
  clear                                      delete all workouts
  map                                        print map markers as GeoJSON
  help                                       show this help
  quit                                       exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coords),
    Type(WorkoutKind),
    Submit(WorkoutForm),
    List,
    Select(String),
    Marker(MarkerHandle),
    Delete(String),
    Clear,
    Map,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("click", [lat, lng]) => {
                let lat = lat.parse().map_err(|_| format!("invalid latitude: {}", lat))?;
                let lng = lng.parse().map_err(|_| format!("invalid longitude: {}", lng))?;
                Command::Click(Coords::new(lat, lng))
            }
            ("type", [kind]) => Command::Type(kind.parse()?),
            ("submit", [kind, distance, duration, metric]) => {
                let mut form = WorkoutForm {
                    kind: kind.to_string(),
                    distance: distance.to_string(),
                    duration: duration.to_string(),
                    ..WorkoutForm::default()
                };
                if kind.eq_ignore_ascii_case("cycling") {
                    form.elevation = metric.to_string();
                } else {
                    form.cadence = metric.to_string();
                }
                Command::Submit(form)
            }
            ("list", []) => Command::List,
            ("select", [id]) => Command::Select(id.to_string()),
            ("marker", [handle]) => Command::Marker(
                handle
                    .parse()
                    .map_err(|_| format!("invalid marker handle: {}", handle))?,
            ),
            ("delete", [id]) => Command::Delete(id.to_string()),
            ("clear", []) => Command::Clear,
            ("map", []) => Command::Map,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (verb, _) => return Err(format!("unrecognized command: {} (try 'help')", verb)),
        };

        Ok(Some(command))
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the app, writing any output to `out`.
pub fn execute<S, L, P, W>(
    app: &mut App<S, InMemoryMap, L, P>,
    command: Command,
    out: &mut W,
) -> io::Result<Flow>
where
    S: KeyValueStore,
    L: ListView,
    P: UserPrompt,
    W: Write,
{
    match command {
        Command::Click(coords) => match app.on_map_click(coords) {
            Ok(()) => writeln!(out, "Form open at {}", coords)?,
            Err(e) => app.report(e),
        },
        Command::Type(kind) => app.on_type_change(kind),
        Command::Submit(mut form) => {
            if let Ok(id) = app.on_submit(&mut form) {
                if let Some(workout) = app.store().find_by_id(id.as_str()) {
                    writeln!(out, "Added {} [{}]", workout.description(), id)?;
                }
            }
        }
        Command::List => write_list(app, out)?,
        Command::Select(id) => match app.on_list_item_click(&id, ClickTarget::Row) {
            Some(coords) => writeln!(out, "Map centered on {}", coords)?,
            None => tracing::debug!(%id, "List click ignored"),
        },
        Command::Marker(handle) => {
            if let Some(id) = app.on_marker_click(handle) {
                writeln!(out, "Highlighted {}", id)?;
            }
        }
        Command::Delete(id) => match app.on_delete_one(&id) {
            Ok(true) => writeln!(out, "Deleted {}", id)?,
            Ok(false) => {}
            Err(AppError::NotFound(_)) => tracing::debug!(%id, "Delete target not found"),
            Err(e) => app.report(e),
        },
        Command::Clear => {
            if let Ok(true) = app.on_delete_all() {
                writeln!(out, "All workouts deleted")?;
            }
        }
        Command::Map => match app.sync().map() {
            Some(map) => {
                let json =
                    serde_json::to_string_pretty(&map.to_geojson()).map_err(io::Error::other)?;
                writeln!(out, "{}", json)?
            }
            None => app.report(AppError::MapUnavailable),
        },
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn write_list<S, L, P, W>(app: &App<S, InMemoryMap, L, P>, out: &mut W) -> io::Result<()>
where
    S: KeyValueStore,
    L: ListView,
    P: UserPrompt,
    W: Write,
{
    if app.store().is_empty() {
        return writeln!(out, "No workouts yet");
    }

    // Newest first, as on the page
    for workout in app.store().workouts().iter().rev() {
        let details: Vec<String> = detail_rows(workout)
            .into_iter()
            .map(|row| format!("{} {} {}", row.icon, row.value, row.unit))
            .collect();
        let marker = app
            .sync()
            .marker_for(workout.id())
            .map(|h| format!(" (marker {})", h))
            .unwrap_or_default();

        writeln!(
            out,
            "[{}] {}{}\n    {}",
            workout.id(),
            workout.description(),
            marker,
            details.join("  ")
        )?;
    }
    Ok(())
}

/// Input lines, shared between the command loop and the prompt.
pub type Lines = Arc<Mutex<mpsc::Receiver<String>>>;

/// Read stdin on a background thread so the command loop can wake up for
/// other events while the user is idle.
pub fn spawn_stdin_reader() -> Lines {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        tracing::debug!("stdin closed");
    });
    Arc::new(Mutex::new(rx))
}

/// Result of waiting for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Idle,
    Closed,
}

/// Wait up to `wait` for the next line.
pub fn next_input(lines: &Lines, wait: Duration) -> Input {
    let Ok(rx) = lines.lock() else {
        return Input::Closed;
    };
    match rx.recv_timeout(wait) {
        Ok(line) => Input::Line(line),
        Err(RecvTimeoutError::Timeout) => Input::Idle,
        Err(RecvTimeoutError::Disconnected) => Input::Closed,
    }
}

/// Dialogs on the terminal. Confirmations take the next input line.
#[derive(Debug)]
pub struct ConsolePrompt {
    lines: Lines,
}

impl ConsolePrompt {
    pub fn new(lines: Lines) -> Self {
        Self { lines }
    }
}

impl UserPrompt for ConsolePrompt {
    fn alert(&mut self, message: &str) {
        println!("⚠ {}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let answer = match self.lines.lock() {
            Ok(rx) => rx.recv().ok(),
            Err(_) => None,
        };
        answer.is_some_and(|a| {
            matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(
            Command::parse("click 40.7 -74.0"),
            Ok(Some(Command::Click(Coords::new(40.7, -74.0))))
        );
        assert!(Command::parse("click north -74").is_err());
    }

    #[test]
    fn test_parse_submit_routes_metric() {
        let Ok(Some(Command::Submit(form))) = Command::parse("submit cycling 20 60 -5") else {
            panic!("expected submit");
        };
        assert_eq!(form.elevation, "-5");
        assert!(form.cadence.is_empty());

        let Ok(Some(Command::Submit(form))) = Command::parse("submit running 5 25 180") else {
            panic!("expected submit");
        };
        assert_eq!(form.cadence, "180");
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("delete").is_err());
    }

    fn lines() -> (mpsc::Sender<String>, Lines) {
        let (tx, rx) = mpsc::channel();
        (tx, Arc::new(Mutex::new(rx)))
    }

    #[test]
    fn test_next_input() {
        let (tx, lines) = lines();
        let wait = Duration::from_millis(10);

        assert_eq!(next_input(&lines, wait), Input::Idle);
        tx.send("list".to_string()).unwrap();
        assert_eq!(next_input(&lines, wait), Input::Line("list".to_string()));
        drop(tx);
        assert_eq!(next_input(&lines, wait), Input::Closed);
    }

    #[test]
    fn test_confirm_reads_next_line() {
        let (tx, lines) = lines();
        let mut prompt = ConsolePrompt::new(lines);

        tx.send(" Yes ".to_string()).unwrap();
        tx.send("n".to_string()).unwrap();
        assert!(prompt.confirm("Delete?"));
        assert!(!prompt.confirm("Delete?"));

        drop(tx);
        assert!(!prompt.confirm("Delete?"));
    }

    #[test]
    fn test_parse_marker_and_quit() {
        assert_eq!(
            Command::parse("marker 3"),
            Ok(Some(Command::Marker(MarkerHandle::new(3))))
        );
        assert_eq!(Command::parse("EXIT"), Ok(Some(Command::Quit)));
    }
}
