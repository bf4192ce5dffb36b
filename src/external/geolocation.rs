use async_trait::async_trait;

use super::GeolocationSource;
use crate::{
    entities::Coordinates,
    error::{geolocation_error, Error},
};

/// Position taken from configuration. Browsers report their own fixes
/// through the location endpoint instead.
#[derive(Clone, Debug, Default)]
pub struct FixedPosition {
    position: Option<Coordinates>,
}

impl FixedPosition {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        self.position.ok_or_else(geolocation_error)
    }
}
