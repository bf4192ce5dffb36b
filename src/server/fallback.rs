use std::net::SocketAddr;

use axum::{
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse},
    Router,
};

use crate::error::Error;

const PAGE: &str = r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Map unavailable</title></head>
  <body>
    <h1>The map could not be loaded</h1>
    <p>Something went wrong while starting the map.</p>
    <p><a href="/" onclick="window.location.reload(); return false;">Reload</a></p>
  </body>
</html>
"#;

/// Replaces the whole application when the map cannot start. Every path
/// answers with the same static error page.
pub fn router() -> Router {
    Router::new().fallback(page.into_service())
}

async fn page() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, Html(PAGE))
}

pub async fn serve_fallback(cause: Error, addr: SocketAddr) {
    tracing::error!("map initialization failed, serving fallback: {}", cause);

    let app = router();

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", err);
    }
}
