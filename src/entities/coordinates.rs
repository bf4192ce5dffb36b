use geo::{Distance, Haversine};
use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{invalid_input_error, Error};

/// A WGS84 position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }

    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Coord {
            x: coordinates.lng,
            y: coordinates.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lng: coord.x,
            lat: coord.y,
        }
    }
}

/// Parses `"lng,lat"`.
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s.split_once(',').ok_or_else(invalid_input_error)?;

        let lng: f64 = lng.trim().parse().map_err(|_| invalid_input_error())?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid_input_error())?;

        let coordinates = Self { lng, lat };

        if !coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        Ok(coordinates)
    }
}
