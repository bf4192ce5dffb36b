use chrono::NaiveDateTime;
use std::sync::Arc;

use super::command::{
    Bounds, Layout, MapCommand, MarkerSpec, DEFAULT_ZOOM, DESTINATION_ZOOM, ROUTE_SOURCE,
};
use super::reconcile::reconcile;
use super::surface::MapSurface;
use crate::{
    entities::{Coordinates, Destination, Route, Via},
    error::Error,
};

pub type DynSurface = Arc<dyn MapSurface + Send + Sync>;

/// Keeps the map surface in step with the view state. Every `sync_*` call
/// re-applies its rule in full; only the differences reach the surface.
pub struct MapAdapter {
    surface: DynSurface,
    markers: Vec<MarkerSpec>,
    user_marker: Option<Coordinates>,
    via: Option<Via>,
    route_geometry: Option<Vec<Coordinates>>,
}

impl MapAdapter {
    #[tracing::instrument(name = "MapAdapter::initialize", skip(surface))]
    pub fn initialize(surface: DynSurface, style_url: &str) -> Result<Self, Error> {
        surface.initialize(style_url)?;

        Ok(Self {
            surface,
            markers: vec![],
            user_marker: None,
            via: None,
            route_geometry: None,
        })
    }

    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    pub fn sync_destinations(
        &mut self,
        destinations: &[Destination],
        selected_id: Option<&str>,
        now: NaiveDateTime,
    ) {
        let next: Vec<MarkerSpec> = destinations
            .iter()
            .map(|d| {
                MarkerSpec {
                    id: d.id.clone(),
                    coordinates: d.coordinates,
                    label: d.name.clone(),
                    category: d.category,
                    open: d.opening_hours.is_open_at(now),
                    scale: 1.0,
                    label_visible: false,
                    z_index: 1,
                }
                .emphasized(selected_id == Some(d.id.as_str()))
            })
            .collect();

        self.apply_markers(next);
    }

    pub fn sync_selection(&mut self, selected_id: Option<&str>) {
        let next: Vec<MarkerSpec> = self
            .markers
            .iter()
            .cloned()
            .map(|m| {
                let emphasized = selected_id == Some(m.id.as_str());
                m.emphasized(emphasized)
            })
            .collect();

        self.apply_markers(next);
    }

    fn apply_markers(&mut self, next: Vec<MarkerSpec>) {
        for command in reconcile(&self.markers, &next) {
            self.surface.apply(command);
        }

        self.markers = next;
    }

    pub fn sync_user_location(&mut self, coordinates: Coordinates) {
        let command = match self.user_marker {
            None => MapCommand::AddUserMarker {
                coordinates,
                draggable: true,
            },
            Some(current) if current == coordinates => return,
            Some(_) => MapCommand::MoveUserMarker { coordinates },
        };

        self.surface.apply(command);
        self.user_marker = Some(coordinates);
    }

    pub fn sync_route(&mut self, route: Option<&Route>) {
        let geometry = route.map(|r| r.geometry.clone()).unwrap_or_default();

        if self.route_geometry.as_ref() != Some(&geometry) {
            self.surface.apply(MapCommand::SetRouteGeometry {
                source: ROUTE_SOURCE.into(),
                coordinates: geometry.clone(),
            });
            self.route_geometry = Some(geometry);
        }

        let via = route.and_then(|r| r.via.clone());

        let command = match (&self.via, &via) {
            (None, None) => None,
            (None, Some(next)) => Some(MapCommand::AddViaMarker {
                coordinates: next.coordinates,
                label: next.label.clone(),
            }),
            (Some(current), Some(next)) if current == next => None,
            (Some(_), Some(next)) => Some(MapCommand::MoveViaMarker {
                coordinates: next.coordinates,
                label: next.label.clone(),
            }),
            (Some(_), None) => Some(MapCommand::RemoveViaMarker),
        };

        if let Some(command) = command {
            self.surface.apply(command);
        }

        self.via = via;
    }

    pub fn fly_to(&self, center: Coordinates, zoom: f64) {
        self.surface.apply(MapCommand::FlyTo { center, zoom });
    }

    pub fn focus_destination(&self, destination: &Destination) {
        self.fly_to(destination.coordinates, DESTINATION_ZOOM);
    }

    pub fn recenter(&self, location: Coordinates) {
        self.fly_to(location, DEFAULT_ZOOM);
    }

    /// Fits the camera to the route, returns false for an empty geometry.
    pub fn frame_route(&self, route: &Route, layout: Layout) -> bool {
        match Bounds::of(&route.geometry) {
            Some(bounds) => {
                self.surface.apply(MapCommand::FitBounds {
                    bounds,
                    padding: layout.padding(),
                });
                true
            }
            None => false,
        }
    }
}
