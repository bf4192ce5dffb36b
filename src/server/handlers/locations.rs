use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, ViewState};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct UpdateParams {
    lng: f64,
    lat: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ElevationParams {
    elevation: Option<f64>,
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<UpdateParams>,
) -> Result<Json<ViewState>, Error> {
    let state = api
        .update_location(Coordinates::new(params.lng, params.lat))
        .await?;

    Ok(state.into())
}

pub async fn update_elevation(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ElevationParams>,
) -> Result<Json<ViewState>, Error> {
    let state = api.update_elevation(params.elevation).await?;

    Ok(state.into())
}

pub async fn locate(Extension(api): Extension<DynAPI>) -> Result<Json<ViewState>, Error> {
    let state = api.locate().await?;

    Ok(state.into())
}

pub async fn recenter(Extension(api): Extension<DynAPI>) -> Result<Json<Coordinates>, Error> {
    let center = api.recenter().await?;

    Ok(center.into())
}
