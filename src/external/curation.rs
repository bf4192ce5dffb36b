use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_status, join_url, CurationService};
use crate::{
    entities::{Coordinates, Destination},
    error::{upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurationRequest {
    pub session_token: Uuid,
    pub user_location: Coordinates,
    pub user_elevation: Option<f64>,
    pub destinations: Vec<Destination>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    destinations: Vec<Destination>,
}

#[derive(Clone, Debug)]
pub struct HttpCurationClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl HttpCurationClient {
    pub fn new(client: reqwest::Client, api_base: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_base,
            api_key,
        }
    }
}

#[async_trait]
impl CurationService for HttpCurationClient {
    #[tracing::instrument(skip(self, request), fields(count = request.destinations.len()))]
    async fn curate(&self, request: CurationRequest) -> Result<Vec<Destination>, Error> {
        let mut builder = self
            .client
            .post(join_url(&self.api_base, "curate"))
            .json(&request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let res = builder.send().await?;

        check_status(res.status())?;

        let data: Response = res.json().await?;

        // partial answers are rejected as a whole
        if data.destinations.len() != request.destinations.len() {
            tracing::warn!(
                "curation returned {} destinations for {}",
                data.destinations.len(),
                request.destinations.len()
            );
            return Err(upstream_error());
        }

        Ok(data.destinations)
    }
}
