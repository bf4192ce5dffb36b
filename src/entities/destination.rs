use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{Coordinates, OpeningHours, Route};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cafe,
    Bar,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Bar => "bar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cafe" => Ok(Self::Cafe),
            "bar" => Ok(Self::Bar),
            _ => Err(invalid_input_error()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub opening_hours: OpeningHours,
    pub elevation: Option<f64>,
    pub route: Option<Route>,
    #[serde(default)]
    pub preferred_waypoints: Vec<Coordinates>,
    pub linked_route_id: Option<String>,
}

impl Destination {
    pub fn new<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        category: Category,
        coordinates: Coordinates,
        opening_hours: OpeningHours,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            coordinates,
            opening_hours,
            elevation: None,
            route: None,
            preferred_waypoints: vec![],
            linked_route_id: None,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Coordinates>) -> Self {
        self.preferred_waypoints = waypoints;
        self
    }

    pub fn with_linked_route<T: Into<String>>(mut self, linked_route_id: T) -> Self {
        self.linked_route_id = Some(linked_route_id.into());
        self
    }

    pub fn route_distance(&self) -> Option<f64> {
        self.route.as_ref().and_then(|route| route.distance)
    }

    /// True when the routing service should be asked for a route.
    pub fn needs_route(&self) -> bool {
        match &self.route {
            Some(route) => route.is_estimate,
            None => true,
        }
    }
}
