//! Response shapes of the geocoding and weather services.
//!
//! Only the fields the lookup reads are modelled; anything else in the
//! documents is ignored.

use serde::Deserialize;

/// One candidate from the geocoding search. Coordinates arrive as text.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMatch {
    pub lat: String,
    pub lon: String,
}

#[derive(Debug, Deserialize)]
pub struct PointResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointProperties {
    /// URL of the station collection serving this grid point.
    #[serde(rename = "observationStations")]
    pub observation_stations: String,
}

#[derive(Debug, Deserialize)]
pub struct StationCollection {
    /// Station resource URLs, nearest first.
    #[serde(rename = "observationStations")]
    pub observation_stations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    pub text_description: String,
    pub temperature: Quantity,
    pub wind_speed: Quantity,
    pub visibility: Quantity,
    pub wind_chill: Quantity,
    pub relative_humidity: Quantity,
}

/// A measured value. The service reports `null` when a sensor has no reading.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
}
