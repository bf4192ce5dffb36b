use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{check_status, join_url, RoutingService};
use crate::{
    entities::{Coordinates, Route},
    error::Error,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkingRouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub origin_elevation: Option<f64>,
    pub destination_elevation: Option<f64>,
    pub waypoints: Vec<Coordinates>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetourRouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    /// Meters.
    pub target_distance: f64,
    pub round_trip: bool,
    pub scenic: bool,
    pub waypoints: Vec<Coordinates>,
    pub linked_route_id: Option<String>,
    pub origin_elevation: Option<f64>,
    pub destination_elevation: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct HttpRoutingClient {
    client: reqwest::Client,
    api_base: String,
}

impl HttpRoutingClient {
    pub fn new(client: reqwest::Client, api_base: String) -> Self {
        Self { client, api_base }
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<Route, Error> {
        let res = self
            .client
            .post(join_url(&self.api_base, path))
            .json(body)
            .send()
            .await?;

        check_status(res.status())?;

        let mut route: Route = res.json().await?;
        route.is_estimate = false;

        Ok(route)
    }
}

#[async_trait]
impl RoutingService for HttpRoutingClient {
    #[tracing::instrument(skip(self))]
    async fn walking_route(&self, request: WalkingRouteRequest) -> Result<Route, Error> {
        self.post("routes/walking", &request).await
    }

    #[tracing::instrument(skip(self))]
    async fn detour_route(&self, request: DetourRouteRequest) -> Result<Route, Error> {
        self.post("routes/detour", &request).await
    }
}
