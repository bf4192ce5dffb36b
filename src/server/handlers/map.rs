use std::sync::Arc;

use axum::extract::{Extension, Json};

use crate::map::{CommandQueue, MapCommand};

/// Hands the pending render commands to the front-end and empties the queue.
pub async fn drain(Extension(queue): Extension<Arc<CommandQueue>>) -> Json<Vec<MapCommand>> {
    let commands = queue.drain();

    tracing::debug!("draining {} map commands", commands.len());

    commands.into()
}
