//! Straight-line walking estimates used before the routing service answers.

use std::cmp::Ordering;

use crate::entities::{Coordinates, Destination, Route};

/// Ratio between real walking distance and straight-line distance.
pub const DETOUR_FACTOR: f64 = 1.35;

/// Meters per second.
pub const WALKING_SPEED: f64 = 1.4;

/// Displacement in meters a location must exceed before estimates are recomputed.
pub const RECOMPUTE_THRESHOLD: f64 = 20.0;

pub fn estimate_route(
    origin: Coordinates,
    origin_elevation: Option<f64>,
    destination: &Destination,
) -> Route {
    let distance = origin.distance_to(&destination.coordinates) * DETOUR_FACTOR;

    let elevation_gain = match (destination.elevation, origin_elevation) {
        (Some(to), Some(from)) => Some(to - from),
        _ => None,
    };

    Route {
        distance: Some(distance),
        duration: Some(distance / WALKING_SPEED),
        geometry: vec![origin, destination.coordinates],
        steps: vec![],
        is_estimate: true,
        elevation_gain,
        via: None,
    }
}

/// Replaces every route with a fresh estimate from `origin`.
pub fn with_estimates(
    destinations: &[Destination],
    origin: Coordinates,
    origin_elevation: Option<f64>,
) -> Vec<Destination> {
    destinations
        .iter()
        .map(|destination| Destination {
            route: Some(estimate_route(origin, origin_elevation, destination)),
            ..destination.clone()
        })
        .collect()
}

/// Stable sort by route distance, missing distances last.
pub fn sort_by_distance(destinations: &mut [Destination]) {
    destinations.sort_by(|a, b| {
        let a = a.route_distance().unwrap_or(f64::INFINITY);
        let b = b.route_distance().unwrap_or(f64::INFINITY);

        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    });
}

pub fn exceeds_threshold(last: Option<Coordinates>, current: Coordinates) -> bool {
    match last {
        Some(last) => last.distance_to(&current) > RECOMPUTE_THRESHOLD,
        None => true,
    }
}
