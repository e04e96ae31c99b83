// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - presentation and boundary logic.

pub mod geolocation;
pub mod ids;
pub mod list;
pub mod map;
pub mod sync;

pub use geolocation::{GeolocationError, Locator};
pub use ids::IdGenerator;
pub use list::{HtmlList, ListView};
pub use map::{InMemoryMap, MapView};
pub use sync::PresentationSync;
