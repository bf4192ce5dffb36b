use super::{now, Engine};

use async_trait::async_trait;

use crate::{
    api::{DetourParams, RouteAPI},
    entities::Destination,
    error::{invalid_input_error, invalid_state_error, Error},
    external::DetourRouteRequest,
    map::Layout,
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn request_detour(
        &self,
        id: String,
        params: DetourParams,
    ) -> Result<Destination, Error> {
        if !(params.target_distance.is_finite() && params.target_distance > 0.0) {
            return Err(invalid_input_error());
        }

        let request = {
            let state = self.state.lock().await;
            let destination = state.find(&id).ok_or_else(invalid_input_error)?;
            let origin = state.user_location.ok_or_else(invalid_state_error)?;

            DetourRouteRequest {
                origin,
                destination: destination.coordinates,
                target_distance: params.target_distance,
                round_trip: params.round_trip,
                scenic: params.scenic,
                waypoints: destination.preferred_waypoints.clone(),
                linked_route_id: destination.linked_route_id.clone(),
                origin_elevation: state.user_elevation,
                destination_elevation: destination.elevation,
            }
        };

        match self.routing.detour_route(request).await {
            Ok(route) => {
                let mut state = self.state.lock().await;
                let selected = state.replace_route(&id, route.clone(), true);

                let layout = Layout::from_mobile(state.flags.mobile);
                let mut map = self.map.lock().await;

                map.sync_destinations(
                    &state.destinations,
                    state.selected.as_ref().map(|d| d.id.as_str()),
                    now(),
                );

                if selected {
                    map.sync_route(Some(&route));
                }
                map.frame_route(&route, layout);
            }
            Err(err) => {
                tracing::warn!("detour to {} failed, keeping previous route: {}", id, err);
            }
        }

        self.state
            .lock()
            .await
            .find(&id)
            .cloned()
            .ok_or_else(invalid_input_error)
    }
}
