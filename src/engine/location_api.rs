use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    entities::{Coordinates, ViewState},
    error::{invalid_input_error, invalid_state_error, Error},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn update_location(&self, coordinates: Coordinates) -> Result<ViewState, Error> {
        if !coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        let elevation = match self.elevation.point_elevation(coordinates).await {
            Ok(elevation) => elevation,
            Err(err) => {
                tracing::warn!("elevation lookup failed: {}", err);
                None
            }
        };

        {
            let mut state = self.state.lock().await;
            state.set_location(coordinates);
            state.set_elevation(elevation);

            self.map.lock().await.sync_user_location(coordinates);
        }

        self.recurate().await;

        Ok(self.state.lock().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn update_elevation(&self, elevation: Option<f64>) -> Result<ViewState, Error> {
        if elevation.map_or(false, |e| !e.is_finite()) {
            return Err(invalid_input_error());
        }

        self.state.lock().await.set_elevation(elevation);

        self.recurate().await;

        Ok(self.state.lock().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn locate(&self) -> Result<ViewState, Error> {
        match self.geolocation.current_position().await {
            Ok(coordinates) => self.update_location(coordinates).await,
            Err(err) => {
                tracing::warn!("geolocation failed: {}", err);
                Ok(self.state.lock().await.clone())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn recenter(&self) -> Result<Coordinates, Error> {
        let location = self
            .state
            .lock()
            .await
            .user_location
            .ok_or_else(invalid_state_error)?;

        self.map.lock().await.recenter(location);

        Ok(location)
    }
}
