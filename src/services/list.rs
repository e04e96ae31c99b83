// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout list view: row templating and the list boundary.

use crate::models::{Workout, WorkoutDetails, WorkoutId};
use std::time::{Duration, Instant};

/// Operations the app needs from the rendered workout list.
pub trait ListView {
    /// Add a row for `id`. Rows arrive in creation order.
    fn insert_row(&mut self, id: &WorkoutId, html: String);

    /// Remove the row for `id`. Returns `false` if there was none.
    fn remove_row(&mut self, id: &WorkoutId) -> bool;

    /// Remove every row.
    fn clear(&mut self);

    /// Briefly highlight the row for `id`.
    fn pulse(&mut self, id: &WorkoutId, duration: Duration);
}

/// One "icon value unit" line of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl DetailRow {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Detail lines shown for a workout, in display order.
pub fn detail_rows(workout: &Workout) -> Vec<DetailRow> {
    let mut rows = vec![
        DetailRow::new(
            workout.kind().emoji(),
            workout.distance().to_string(),
            "km",
        ),
        DetailRow::new("⏱", workout.duration().to_string(), "min"),
    ];

    match workout.details() {
        WorkoutDetails::Running { cadence, pace } => {
            rows.push(DetailRow::new("⚡️", format!("{:.1}", pace), "min/km"));
            rows.push(DetailRow::new("🦶🏼", cadence.to_string(), "spm"));
        }
        WorkoutDetails::Cycling {
            elevation_gain,
            speed,
        } => {
            rows.push(DetailRow::new("⚡️", format!("{:.1}", speed), "km/h"));
            rows.push(DetailRow::new("⛰", elevation_gain.to_string(), "m"));
        }
    }

    rows
}

/// HTML fragment for one list row.
pub fn render_row(workout: &Workout) -> String {
    let kind = workout.kind().as_str();
    let mut html = format!(
        "<li class=\"workout workout--{kind}\" data-id=\"{id}\">\n  \
         <h2 class=\"workout__title\">{title}</h2>\n  \
         <button class=\"workout__delete\" data-action=\"delete\" title=\"Delete workout\">✕</button>\n",
        kind = kind,
        id = escape_html(workout.id().as_str()),
        title = escape_html(workout.description()),
    );

    for row in detail_rows(workout) {
        html.push_str(&format!(
            "  <div class=\"workout__details\">\n    \
             <span class=\"workout__icon\">{}</span>\n    \
             <span class=\"workout__value\">{}</span>\n    \
             <span class=\"workout__unit\">{}</span>\n  \
             </div>\n",
            row.icon, row.value, row.unit
        ));
    }

    html.push_str("</li>");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A rendered row.
#[derive(Debug, Clone)]
pub struct ListRow {
    pub id: WorkoutId,
    pub html: String,
    highlighted_until: Option<Instant>,
}

/// Headless list that keeps rendered HTML rows.
#[derive(Debug, Default)]
pub struct HtmlList {
    rows: Vec<ListRow>,
}

impl HtmlList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in creation order.
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.rows.iter().any(|r| &r.id == id)
    }

    pub fn is_highlighted(&self, id: &WorkoutId) -> bool {
        self.is_highlighted_at(id, Instant::now())
    }

    pub fn is_highlighted_at(&self, id: &WorkoutId, now: Instant) -> bool {
        self.rows
            .iter()
            .find(|r| &r.id == id)
            .and_then(|r| r.highlighted_until)
            .is_some_and(|until| now < until)
    }

    /// The list as it appears on the page: each new row is inserted right
    /// after the form, so the newest row comes first.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .rev()
            .map(|r| r.html.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ListView for HtmlList {
    fn insert_row(&mut self, id: &WorkoutId, html: String) {
        self.rows.push(ListRow {
            id: id.clone(),
            html,
            highlighted_until: None,
        });
    }

    fn remove_row(&mut self, id: &WorkoutId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| &r.id != id);
        self.rows.len() != before
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn pulse(&mut self, id: &WorkoutId, duration: Duration) {
        if let Some(row) = self.rows.iter_mut().find(|r| &r.id == id) {
            row.highlighted_until = Some(Instant::now() + duration);
        }
    }
}
