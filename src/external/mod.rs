pub mod curation;
pub mod elevation;
pub mod geolocation;
pub mod routing;

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;

use crate::{
    entities::{Coordinates, Destination, Route},
    error::{invalid_input_error, upstream_error, Error},
};

pub use curation::{CurationRequest, HttpCurationClient};
pub use elevation::HttpElevationClient;
pub use geolocation::FixedPosition;
pub use routing::{DetourRouteRequest, HttpRoutingClient, WalkingRouteRequest};

#[async_trait]
pub trait RoutingService {
    async fn walking_route(&self, request: WalkingRouteRequest) -> Result<Route, Error>;
    async fn detour_route(&self, request: DetourRouteRequest) -> Result<Route, Error>;
}

#[async_trait]
pub trait CurationService {
    async fn curate(&self, request: CurationRequest) -> Result<Vec<Destination>, Error>;
}

#[async_trait]
pub trait ElevationService {
    async fn point_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, Error>;
}

/// One-shot position query.
#[async_trait]
pub trait GeolocationSource {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub type DynRouting = Arc<dyn RoutingService + Send + Sync>;
pub type DynCuration = Arc<dyn CurationService + Send + Sync>;
pub type DynElevation = Arc<dyn ElevationService + Send + Sync>;
pub type DynGeolocation = Arc<dyn GeolocationSource + Send + Sync>;

pub fn check_status(status: StatusCode) -> Result<(), Error> {
    let status_code = status.as_u16();

    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
