// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, TimeZone};

/// English month names, indexed 0-11.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a timestamp as "<Month> <Day>" in the timestamp's own offset.
pub fn format_month_day<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!("{} {}", MONTHS[date.month0() as usize], date.day())
}
