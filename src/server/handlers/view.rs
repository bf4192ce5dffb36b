use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{UiFlags, ViewState};
use crate::error::Error;
use crate::map::Layout;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LayoutParams {
    layout: Layout,
}

pub async fn snapshot(Extension(api): Extension<DynAPI>) -> Result<Json<ViewState>, Error> {
    let state = api.snapshot().await?;

    Ok(state.into())
}

pub async fn toggle_sidebar(Extension(api): Extension<DynAPI>) -> Result<Json<UiFlags>, Error> {
    let flags = api.toggle_sidebar().await?;

    Ok(flags.into())
}

pub async fn toggle_debug(Extension(api): Extension<DynAPI>) -> Result<Json<UiFlags>, Error> {
    let flags = api.toggle_debug().await?;

    Ok(flags.into())
}

pub async fn set_layout(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LayoutParams>,
) -> Result<Json<UiFlags>, Error> {
    let flags = api.set_layout(params.layout).await?;

    Ok(flags.into())
}
