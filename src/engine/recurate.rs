use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use super::{render, Engine};
use crate::{
    entities::{Recompute, ViewState},
    external::{CurationRequest, DynCuration},
    map::MapAdapter,
};

impl Engine {
    /// Starts the estimate and curation pipeline in the background if the user
    /// moved far enough and no other run is in flight. The loading flag is set
    /// before this returns. Returns true when a run was started.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn recurate(&self) -> bool {
        let recompute = match self.state.lock().await.begin_recompute() {
            Some(recompute) => recompute,
            None => return false,
        };

        let curator = Curator {
            state: self.state.clone(),
            map: self.map.clone(),
            curation: self.curation.clone(),
            session_token: self.session_token,
        };

        tokio::spawn(curator.run(recompute).in_current_span());

        true
    }
}

struct Curator {
    state: Arc<Mutex<ViewState>>,
    map: Arc<Mutex<MapAdapter>>,
    curation: DynCuration,
    session_token: Uuid,
}

impl Curator {
    async fn run(self, mut recompute: Recompute) {
        loop {
            let request = CurationRequest {
                session_token: self.session_token,
                user_location: recompute.origin,
                user_elevation: recompute.origin_elevation,
                destinations: recompute.estimates.clone(),
            };

            let curated = match self.curation.curate(request).await {
                Ok(curated) => curated,
                Err(err) => {
                    tracing::warn!("curation failed, keeping previous destinations: {}", err);
                    self.state.lock().await.abort_recompute(recompute);
                    return;
                }
            };

            let count = curated.len();
            let mut state = self.state.lock().await;

            if state.complete_recompute(recompute, curated) {
                drop(state);

                tracing::info!("curated {} destinations", count);
                render(&self.state, &self.map).await;
                return;
            }

            tracing::debug!("destination list replaced during curation, restarting");

            recompute = match state.begin_recompute() {
                Some(next) => next,
                None => return,
            };
        }
    }
}
