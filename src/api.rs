use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::{Category, Coordinates, Destination, UiFlags, ViewState};
use crate::error::Error;
use crate::map::Layout;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetourParams {
    /// Meters.
    pub target_distance: f64,
    #[serde(default)]
    pub round_trip: bool,
    #[serde(default)]
    pub scenic: bool,
}

#[async_trait]
pub trait LocationAPI {
    async fn update_location(&self, coordinates: Coordinates) -> Result<ViewState, Error>;
    async fn update_elevation(&self, elevation: Option<f64>) -> Result<ViewState, Error>;
    async fn locate(&self) -> Result<ViewState, Error>;
    async fn recenter(&self) -> Result<Coordinates, Error>;
}

#[async_trait]
pub trait DestinationAPI {
    async fn list_destinations(&self) -> Result<Vec<Destination>, Error>;
    async fn select_destination(&self, id: String) -> Result<Destination, Error>;
    async fn clear_selection(&self) -> Result<(), Error>;
    async fn filter_category(&self, category: Category) -> Result<Vec<Destination>, Error>;
    async fn clear_filter(&self) -> Result<Vec<Destination>, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn request_detour(&self, id: String, params: DetourParams)
        -> Result<Destination, Error>;
}

#[async_trait]
pub trait ViewAPI {
    async fn snapshot(&self) -> Result<ViewState, Error>;
    async fn toggle_sidebar(&self) -> Result<UiFlags, Error>;
    async fn toggle_debug(&self) -> Result<UiFlags, Error>;
    async fn set_layout(&self, layout: Layout) -> Result<UiFlags, Error>;
}

pub trait API: LocationAPI + DestinationAPI + RouteAPI + ViewAPI {}
