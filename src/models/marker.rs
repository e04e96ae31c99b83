// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map marker descriptors and handles.
//!
//! These are presentation-only values. Handles are never persisted; they are
//! issued fresh by the map every time a marker is placed.

use crate::models::workout::{Coords, Workout};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const ICON_URL_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";
const SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

/// Opaque token for a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MarkerHandle {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Which group a marker belongs to.
///
/// `Workouts` is bulk-clearable; `Base` holds the position marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerLayer {
    Base,
    Workouts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Blue,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Blue => "blue",
        }
    }
}

/// Icon descriptor understood by the map library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
    pub shadow_url: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: [u32; 2],
}

impl Icon {
    pub fn colored(color: MarkerColor) -> Self {
        Self {
            icon_url: format!("{}/marker-icon-2x-{}.png", ICON_URL_BASE, color.as_str()),
            shadow_url: SHADOW_URL.to_string(),
            icon_size: [20, 31],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_size: [41, 41],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: class_name.into(),
        }
    }
}

/// Everything needed to place one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub coords: Coords,
    pub icon: Icon,
    pub popup: PopupOptions,
    pub content: String,
}

impl MarkerSpec {
    /// Blue marker with "<emoji><description>" popup.
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            coords: workout.coords(),
            icon: Icon::colored(MarkerColor::Blue),
            popup: PopupOptions::with_class(format!("{}-popup", kind.as_str())),
            content: format!("{}{}", kind.emoji(), workout.description()),
        }
    }

    /// Red "You are here !" marker.
    pub fn current_position(coords: Coords) -> Self {
        Self {
            coords,
            icon: Icon::colored(MarkerColor::Red),
            popup: PopupOptions::with_class("running-popup"),
            content: "You are here !".to_string(),
        }
    }
}

/// Animated pan parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url_uses_color() {
        let icon = Icon::colored(MarkerColor::Red);
        assert!(icon.icon_url.ends_with("marker-icon-2x-red.png"));
        assert_eq!(icon.icon_size, [20, 31]);
    }

    #[test]
    fn test_popup_options_defaults() {
        let popup = PopupOptions::with_class("cycling-popup");
        assert_eq!(popup.max_width, 250);
        assert_eq!(popup.min_width, 100);
        assert!(!popup.auto_close);
        assert!(!popup.close_on_click);
    }

    #[test]
    fn test_handle_parses() {
        assert_eq!("7".parse::<MarkerHandle>().unwrap(), MarkerHandle::new(7));
        assert!("x".parse::<MarkerHandle>().is_err());
    }
}
