mod destination_api;
mod location_api;
mod recurate;
mod route_api;
mod view_api;

#[cfg(test)]
mod tests;

use chrono::{Local, NaiveDateTime};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    entities::{Destination, ViewState},
    error::Error,
    external::{
        DynCuration, DynElevation, DynGeolocation, DynRouting, FixedPosition,
        HttpCurationClient, HttpElevationClient, HttpRoutingClient,
    },
    map::{DynSurface, MapAdapter},
};

/// The external collaborators an engine talks to.
#[derive(Clone)]
pub struct Services {
    pub routing: DynRouting,
    pub curation: DynCuration,
    pub elevation: DynElevation,
    pub geolocation: DynGeolocation,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = config.http_client()?;

        Ok(Self {
            routing: Arc::new(HttpRoutingClient::new(
                client.clone(),
                config.routing_api_base.clone(),
            )),
            curation: Arc::new(HttpCurationClient::new(
                client.clone(),
                config.curation_api_base.clone(),
                config.curation_api_key.clone(),
            )),
            elevation: Arc::new(HttpElevationClient::new(
                client,
                config.elevation_api_base.clone(),
            )),
            geolocation: Arc::new(FixedPosition::new(config.fixed_location)),
        })
    }
}

/// Owns the view state and the map adapter. Locks are taken state first,
/// then map, and are never held across a service call. Both are shared with
/// the background curation task.
pub struct Engine {
    state: Arc<Mutex<ViewState>>,
    map: Arc<Mutex<MapAdapter>>,
    seed: Vec<Destination>,
    session_token: Uuid,
    routing: DynRouting,
    curation: DynCuration,
    elevation: DynElevation,
    geolocation: DynGeolocation,
}

impl Engine {
    /// Fails only when the map surface cannot be initialized.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        services: Services,
        surface: DynSurface,
        style_url: &str,
        seed: Vec<Destination>,
        debug: bool,
    ) -> Result<Self, Error> {
        let mut map = MapAdapter::initialize(surface, style_url)?;

        let seed = enrich_elevations(&services, seed).await;
        let state = ViewState::new(seed.clone(), debug);

        map.sync_destinations(&state.destinations, None, now());
        map.recenter(crate::seed::DEFAULT_CENTER);

        tracing::info!("engine ready with {} destinations", seed.len());

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            map: Arc::new(Mutex::new(map)),
            seed,
            session_token: Uuid::new_v4(),
            routing: services.routing,
            curation: services.curation,
            elevation: services.elevation,
            geolocation: services.geolocation,
        })
    }

    async fn render(&self) {
        render(&self.state, &self.map).await;
    }
}

impl API for Engine {}

/// Re-applies every map rule to the current state.
async fn render(state: &Mutex<ViewState>, map: &Mutex<MapAdapter>) {
    let state = state.lock().await;
    let mut map = map.lock().await;

    let selected = state.selected.as_ref();

    map.sync_destinations(
        &state.destinations,
        selected.map(|d| d.id.as_str()),
        now(),
    );
    map.sync_route(selected.and_then(|d| d.route.as_ref()));
}

/// Local wall-clock time, used for opening-hours evaluation.
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Looks up missing elevations concurrently. Failures leave `None`.
#[tracing::instrument(skip_all)]
async fn enrich_elevations(services: &Services, seed: Vec<Destination>) -> Vec<Destination> {
    let lookups = seed.into_iter().map(|mut destination| {
        let elevation = services.elevation.clone();

        async move {
            if destination.elevation.is_none() {
                match elevation.point_elevation(destination.coordinates).await {
                    Ok(value) => destination.elevation = value,
                    Err(err) => {
                        tracing::warn!("elevation lookup failed for {}: {}", destination.id, err)
                    }
                }
            }

            destination
        }
    });

    join_all(lookups).await
}
