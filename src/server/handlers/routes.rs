use axum::extract::{Extension, Json, Path};

use crate::api::DetourParams;
use crate::entities::Destination;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn detour(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(params): Json<DetourParams>,
) -> Result<Json<Destination>, Error> {
    let destination = api.request_detour(id, params).await?;

    Ok(destination.into())
}
