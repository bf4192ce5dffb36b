use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::entities::{Category, Destination};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct FilterParams {
    category: Category,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Destination>>, Error> {
    let destinations = api.list_destinations().await?;

    Ok(destinations.into())
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Destination>, Error> {
    let destination = api.select_destination(id).await?;

    Ok(destination.into())
}

pub async fn clear_selection(Extension(api): Extension<DynAPI>) -> Result<Json<()>, Error> {
    api.clear_selection().await?;

    Ok(().into())
}

pub async fn filter(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<FilterParams>,
) -> Result<Json<Vec<Destination>>, Error> {
    let destinations = api.filter_category(params.category).await?;

    Ok(destinations.into())
}

pub async fn clear_filter(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<Destination>>, Error> {
    let destinations = api.clear_filter().await?;

    Ok(destinations.into())
}
