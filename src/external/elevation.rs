use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{check_status, join_url, ElevationService};
use crate::{entities::Coordinates, error::Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    elevation: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct HttpElevationClient {
    client: reqwest::Client,
    api_base: String,
}

impl HttpElevationClient {
    pub fn new(client: reqwest::Client, api_base: String) -> Self {
        Self { client, api_base }
    }
}

#[async_trait]
impl ElevationService for HttpElevationClient {
    #[tracing::instrument(skip(self))]
    async fn point_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, Error> {
        let res = self
            .client
            .get(join_url(&self.api_base, "elevation"))
            .query(&[("lat", coordinates.lat)])
            .query(&[("lng", coordinates.lng)])
            .send()
            .await?;

        check_status(res.status())?;

        let data: Response = res.json().await?;

        Ok(data.elevation.filter(|e| e.is_finite()))
    }
}
