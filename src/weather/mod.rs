//! Current-conditions lookup: geocoding → grid point → station → latest observation.

pub mod format;
pub mod types;

pub use format::WeatherObservation;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::FitcastConfig;
use crate::error::LookupError;
use crate::provider::http::shared_client;

use types::{GeocodeMatch, ObservationResponse, PointResponse, StationCollection};

/// Anything that can describe the current weather at a free-text location.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn lookup(&self, location: &str) -> Result<String, LookupError>;
}

/// Client for the Nominatim geocoder and the api.weather.gov observation chain.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    geocoding_base_url: String,
    weather_base_url: String,
    user_agent: String,
}

impl WeatherClient {
    pub fn new(config: &FitcastConfig) -> Self {
        Self {
            geocoding_base_url: trim_trailing_slash(config.geocoding_base_url()),
            weather_base_url: trim_trailing_slash(config.weather_base_url()),
            user_agent: config.user_agent().to_string(),
        }
    }

    /// Resolve the first geocoding match for `location`.
    pub async fn geocode(&self, location: &str) -> Result<GeocodeMatch, LookupError> {
        let url = format!("{}/search", self.geocoding_base_url);
        let matches: Vec<GeocodeMatch> = self
            .get_json(&url, &[("q", location), ("format", "json"), ("limit", "1")])
            .await?;
        matches
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::LocationNotFound(location.to_string()))
    }

    /// Station id of the first station serving the grid point at `lat,lon`.
    pub async fn nearest_station(&self, lat: &str, lon: &str) -> Result<String, LookupError> {
        let point_url = format!("{}/points/{lat},{lon}", self.weather_base_url);
        let point: PointResponse = self.get_json(&point_url, &[]).await?;

        let stations_url = point.properties.observation_stations;
        let stations: StationCollection = self.get_json(&stations_url, &[]).await?;
        let first = stations
            .observation_stations
            .first()
            .ok_or_else(|| LookupError::NoStations(stations_url.clone()))?;

        match first.trim_end().rsplit('/').next() {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(LookupError::MalformedResponse(format!(
                "station url '{first}' has no station id"
            ))),
        }
    }

    /// Latest observation reported by `station_id`.
    pub async fn latest_observation(
        &self,
        station_id: &str,
    ) -> Result<WeatherObservation, LookupError> {
        let url = format!(
            "{}/stations/{station_id}/observations/latest",
            self.weather_base_url
        );
        let observation: ObservationResponse = self.get_json(&url, &[]).await?;
        debug!(
            station = station_id,
            units = ?format::unit_codes(&observation.properties),
            "observation units as reported"
        );
        Ok(observation.properties.into())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        debug!(url, "weather GET");

        let resp = shared_client()
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(LookupError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| LookupError::MalformedResponse(format!("{url}: {e}")))
    }
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    async fn lookup(&self, location: &str) -> Result<String, LookupError> {
        let place = self.geocode(location).await?;
        debug!(location, lat = %place.lat, lon = %place.lon, "geocoded");

        let station = self.nearest_station(&place.lat, &place.lon).await?;
        debug!(location, station = %station, "resolved station");

        let observation = self.latest_observation(&station).await?;
        Ok(observation.report(location))
    }
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
