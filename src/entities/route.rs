use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Meters.
    pub distance: Option<f64>,
    /// Seconds.
    pub duration: Option<f64>,
    #[serde(default)]
    pub geometry: Vec<Coordinates>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub is_estimate: bool,
    pub elevation_gain: Option<f64>,
    pub via: Option<Via>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub distance: f64,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub coordinates: Coordinates,
    pub label: String,
}

impl Route {
    pub fn is_authoritative(&self) -> bool {
        !self.is_estimate
    }

    pub fn has_geometry(&self) -> bool {
        !self.geometry.is_empty()
    }
}
