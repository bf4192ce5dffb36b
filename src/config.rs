use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::{
    entities::Coordinates,
    error::{config_error, Error},
};

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub routing_api_base: String,
    pub curation_api_base: String,
    pub curation_api_key: Option<String>,
    pub elevation_api_base: String,
    pub map_style_url: String,
    pub fixed_location: Option<Coordinates>,
    pub debug: bool,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads `.env` (when present) and the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| config_error(format!("missing {}", key)))
        };

        let bind_addr: SocketAddr = lookup("WAYFARER_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".into())
            .parse()?;

        let fixed_location = match lookup("WAYFARER_LOCATION") {
            Some(value) => Some(
                value
                    .parse()
                    .map_err(|_| config_error("WAYFARER_LOCATION must be \"lng,lat\""))?,
            ),
            None => None,
        };

        let debug = match lookup("WAYFARER_DEBUG").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(_) => return Err(config_error("WAYFARER_DEBUG must be a boolean")),
        };

        let request_timeout = match lookup("WAYFARER_REQUEST_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| config_error("WAYFARER_REQUEST_TIMEOUT_SECS must be an integer"))?,
            None => Duration::from_secs(10),
        };

        Ok(Self {
            bind_addr,
            routing_api_base: required("ROUTING_API_BASE")?,
            curation_api_base: required("CURATION_API_BASE")?,
            curation_api_key: lookup("CURATION_API_KEY").filter(|v| !v.is_empty()),
            elevation_api_base: required("ELEVATION_API_BASE")?,
            map_style_url: required("MAP_STYLE_URL")?,
            fixed_location,
            debug,
            request_timeout,
        })
    }

    pub fn http_client(&self) -> Result<reqwest::Client, Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?)
    }
}
