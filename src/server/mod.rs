mod fallback;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::API;
use crate::map::CommandQueue;
use crate::server::handlers::{destinations, locations, map, routes, view};

pub use fallback::serve_fallback;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI, queue: Arc<CommandQueue>) -> Router {
    Router::new()
        .route("/state", get(view::snapshot))
        .route("/view/sidebar", patch(view::toggle_sidebar))
        .route("/view/debug", patch(view::toggle_debug))
        .route("/view/layout", patch(view::set_layout))
        .route("/location", post(locations::update))
        .route("/location/elevation", post(locations::update_elevation))
        .route("/location/locate", post(locations::locate))
        .route("/location/recenter", post(locations::recenter))
        .route("/destinations", get(destinations::list))
        .route("/destinations/:id/select", post(destinations::select))
        .route("/destinations/:id/detour", post(routes::detour))
        .route("/selection", delete(destinations::clear_selection))
        .route(
            "/filter",
            post(destinations::filter).delete(destinations::clear_filter),
        )
        .route("/map/commands", get(map::drain))
        .layer(Extension(api))
        .layer(Extension(queue))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    queue: Arc<CommandQueue>,
    addr: SocketAddr,
) {
    let api = Arc::new(api) as DynAPI;

    let app = router(api, queue);

    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", err);
    }
}
