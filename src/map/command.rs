use geo::BoundingRect;
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::entities::{Category, Coordinates};

/// Name of the single line source that carries the selected route.
pub const ROUTE_SOURCE: &str = "route";

pub const DEFAULT_ZOOM: f64 = 15.0;
pub const DESTINATION_ZOOM: f64 = 16.5;

/// Imperative instruction for the map surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    SetStyle {
        url: String,
    },
    AddMarker {
        marker: MarkerSpec,
    },
    UpdateMarker {
        marker: MarkerSpec,
    },
    RemoveMarker {
        id: String,
    },
    AddUserMarker {
        coordinates: Coordinates,
        draggable: bool,
    },
    MoveUserMarker {
        coordinates: Coordinates,
    },
    SetRouteGeometry {
        source: String,
        coordinates: Vec<Coordinates>,
    },
    AddViaMarker {
        coordinates: Coordinates,
        label: String,
    },
    MoveViaMarker {
        coordinates: Coordinates,
        label: String,
    },
    RemoveViaMarker,
    FlyTo {
        center: Coordinates,
        zoom: f64,
    },
    FitBounds {
        bounds: Bounds,
        padding: Padding,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub id: String,
    pub coordinates: Coordinates,
    pub label: String,
    pub category: Category,
    pub open: bool,
    pub scale: f64,
    pub label_visible: bool,
    pub z_index: i32,
}

impl MarkerSpec {
    pub fn is_emphasized(&self) -> bool {
        self.label_visible
    }

    pub fn emphasized(mut self, emphasized: bool) -> Self {
        if emphasized {
            self.scale = 1.4;
            self.label_visible = true;
            self.z_index = 10;
        } else {
            self.scale = 1.0;
            self.label_visible = false;
            self.z_index = 1;
        }
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Bounding box of a geometry, `None` when it is empty.
    pub fn of(geometry: &[Coordinates]) -> Option<Self> {
        let line: LineString<f64> = geometry.iter().map(|&c| Coord::from(c)).collect();
        let rect = line.bounding_rect()?;

        Some(Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Mobile,
    Desktop,
}

impl Layout {
    pub fn from_mobile(mobile: bool) -> Self {
        if mobile {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Insets that keep the route clear of the bottom sheet or the sidebar.
    pub fn padding(&self) -> Padding {
        match self {
            Self::Mobile => Padding {
                top: 80,
                bottom: 360,
                left: 40,
                right: 40,
            },
            Self::Desktop => Padding {
                top: 80,
                bottom: 80,
                left: 440,
                right: 80,
            },
        }
    }
}
