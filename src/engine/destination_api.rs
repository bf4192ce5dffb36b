use super::{now, Engine};

use async_trait::async_trait;

use crate::{
    api::DestinationAPI,
    entities::{Category, Destination},
    error::Error,
    external::WalkingRouteRequest,
    map::Layout,
};

#[async_trait]
impl DestinationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_destinations(&self) -> Result<Vec<Destination>, Error> {
        Ok(self.state.lock().await.destinations.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn select_destination(&self, id: String) -> Result<Destination, Error> {
        let (ticket, origin, origin_elevation, layout) = {
            let mut state = self.state.lock().await;
            let ticket = state.select(&id)?;

            let mut map = self.map.lock().await;
            map.sync_selection(Some(&id));
            map.focus_destination(&ticket.destination);
            map.sync_route(ticket.destination.route.as_ref());

            (
                ticket,
                state.user_location,
                state.user_elevation,
                Layout::from_mobile(state.flags.mobile),
            )
        };

        let destination = &ticket.destination;

        if !destination.needs_route() {
            if let Some(route) = &destination.route {
                self.map.lock().await.frame_route(route, layout);
            }

            return Ok(ticket.destination);
        }

        let origin = match origin {
            Some(origin) => origin,
            None => {
                tracing::info!("no user location yet, not routing to {}", id);
                return Ok(ticket.destination);
            }
        };

        let request = WalkingRouteRequest {
            origin,
            destination: destination.coordinates,
            origin_elevation,
            destination_elevation: destination.elevation,
            waypoints: destination.preferred_waypoints.clone(),
        };

        let route = match self.routing.walking_route(request).await {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!("routing to {} failed, keeping estimate: {}", id, err);
                return Ok(ticket.destination);
            }
        };

        let mut state = self.state.lock().await;
        let current = state.is_current_selection(&ticket);

        state.replace_route(&id, route.clone(), current);

        let mut map = self.map.lock().await;
        map.sync_destinations(
            &state.destinations,
            state.selected.as_ref().map(|d| d.id.as_str()),
            now(),
        );

        if current {
            let layout = Layout::from_mobile(state.flags.mobile);
            map.sync_route(Some(&route));
            map.frame_route(&route, layout);
        } else {
            tracing::debug!("selection moved on, discarding route for {}", id);
        }

        Ok(state.find(&id).cloned().unwrap_or(ticket.destination))
    }

    #[tracing::instrument(skip(self))]
    async fn clear_selection(&self) -> Result<(), Error> {
        self.state.lock().await.clear_selection();

        let mut map = self.map.lock().await;
        map.sync_selection(None);
        map.sync_route(None);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn filter_category(&self, category: Category) -> Result<Vec<Destination>, Error> {
        self.state.lock().await.filter(category, &self.seed);
        self.render().await;

        Ok(self.state.lock().await.destinations.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_filter(&self) -> Result<Vec<Destination>, Error> {
        self.state.lock().await.clear_filter(&self.seed);
        self.render().await;

        Ok(self.state.lock().await.destinations.clone())
    }
}
