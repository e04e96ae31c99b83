// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapping-library boundary.
//!
//! `MapView` is what the synchronizer and controller call; `InMemoryMap` is
//! a headless implementation that tracks placed markers and the current
//! view, and can export them as GeoJSON.

use crate::models::{Coords, MarkerHandle, MarkerLayer, MarkerSpec, PanOptions};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use std::collections::BTreeMap;

/// Operations the app needs from a map.
pub trait MapView {
    /// Center the view. `zoom: None` keeps the current zoom.
    fn set_view(&mut self, center: Coords, zoom: Option<u8>, pan: Option<PanOptions>);

    /// Place a marker in `layer` and return its handle.
    fn add_marker(&mut self, spec: MarkerSpec, layer: MarkerLayer) -> MarkerHandle;

    /// Remove one marker. Returns `false` if the handle is unknown.
    fn remove_marker(&mut self, handle: MarkerHandle) -> bool;

    /// Remove every marker in `layer`.
    fn clear_layer(&mut self, layer: MarkerLayer);
}

/// A marker placed on an `InMemoryMap`.
#[derive(Debug, Clone)]
pub struct PlacedMarker {
    pub spec: MarkerSpec,
    pub layer: MarkerLayer,
}

/// Headless map.
#[derive(Debug, Default)]
pub struct InMemoryMap {
    center: Option<Coords>,
    zoom: Option<u8>,
    last_pan: Option<PanOptions>,
    markers: BTreeMap<MarkerHandle, PlacedMarker>,
    next_handle: u64,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Option<Coords> {
        self.center
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    pub fn last_pan(&self) -> Option<PanOptions> {
        self.last_pan
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&PlacedMarker> {
        self.markers.get(&handle)
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &PlacedMarker)> {
        self.markers.iter().map(|(h, m)| (*h, m))
    }

    pub fn marker_count(&self, layer: MarkerLayer) -> usize {
        self.markers.values().filter(|m| m.layer == layer).count()
    }

    /// All markers as a GeoJSON FeatureCollection (one Point feature each).
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .markers
            .iter()
            .map(|(handle, marker)| {
                let point: geo::Point<f64> = marker.spec.coords.into();

                let mut properties = JsonObject::new();
                properties.insert("layer".to_string(), serde_json::json!(marker.layer));
                properties.insert(
                    "content".to_string(),
                    serde_json::json!(marker.spec.content),
                );
                properties.insert(
                    "className".to_string(),
                    serde_json::json!(marker.spec.popup.class_name),
                );
                properties.insert(
                    "iconUrl".to_string(),
                    serde_json::json!(marker.spec.icon.icon_url),
                );

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&point))),
                    id: Some(geojson::feature::Id::Number(handle.get().into())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl MapView for InMemoryMap {
    fn set_view(&mut self, center: Coords, zoom: Option<u8>, pan: Option<PanOptions>) {
        self.center = Some(center);
        if zoom.is_some() {
            self.zoom = zoom;
        }
        self.last_pan = pan;
    }

    fn add_marker(&mut self, spec: MarkerSpec, layer: MarkerLayer) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle::new(self.next_handle);
        self.markers.insert(handle, PlacedMarker { spec, layer });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> bool {
        self.markers.remove(&handle).is_some()
    }

    fn clear_layer(&mut self, layer: MarkerLayer) {
        self.markers.retain(|_, m| m.layer != layer);
    }
}
