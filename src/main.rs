use std::sync::Arc;

use wayfarer::api::LocationAPI;
use wayfarer::config::Config;
use wayfarer::engine::{Engine, Services};
use wayfarer::map::CommandQueue;
use wayfarer::server::{serve, serve_fallback};
use wayfarer::seed;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            return;
        }
    };

    let services = match Services::from_config(&config) {
        Ok(services) => services,
        Err(err) => {
            tracing::error!("failed to build service clients: {}", err);
            return;
        }
    };

    let queue = Arc::new(CommandQueue::new());

    let engine = match Engine::new(
        services,
        queue.clone(),
        &config.map_style_url,
        seed::destinations(),
        config.debug,
    )
    .await
    {
        Ok(engine) => engine,
        Err(err) if err.is_map_initialization_error() => {
            serve_fallback(err, config.bind_addr).await;
            return;
        }
        Err(err) => {
            tracing::error!("failed to start: {}", err);
            return;
        }
    };

    if config.fixed_location.is_some() {
        if let Err(err) = engine.locate().await {
            tracing::warn!("initial location failed: {}", err);
        }
    }

    serve(engine, queue, config.bind_addr).await;
}
