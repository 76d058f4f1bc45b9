//! Flattening an observation into the text block handed back to the model.

use std::fmt;

use super::types::{ObservationProperties, Quantity};

/// Latest conditions at a station. Values are kept in the units the service
/// reported; the labels in [`WeatherObservation::report`] do not convert them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub description: String,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub visibility: Option<f64>,
    pub wind_chill: Option<f64>,
    pub relative_humidity: Option<f64>,
}

impl From<ObservationProperties> for WeatherObservation {
    fn from(p: ObservationProperties) -> Self {
        Self {
            description: p.text_description,
            temperature: p.temperature.value,
            wind_speed: p.wind_speed.value,
            visibility: p.visibility.value,
            wind_chill: p.wind_chill.value,
            relative_humidity: p.relative_humidity.value,
        }
    }
}

struct Reading(Option<f64>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("unavailable"),
        }
    }
}

impl WeatherObservation {
    /// Fixed-layout report labelled with the location exactly as requested.
    pub fn report(&self, location: &str) -> String {
        format!(
            "Weather Data for {location}:\n\
             \n\
             Current Weather: {}\n\
             Current Temperature: {} degrees celsius\n\
             Windspeed: {} km per hr\n\
             Visibility: {} meters\n\
             Wind Chill: {} degrees celsius\n\
             Relative Humidity: {} %\n",
            self.description,
            Reading(self.temperature),
            Reading(self.wind_speed),
            Reading(self.visibility),
            Reading(self.wind_chill),
            Reading(self.relative_humidity),
        )
    }
}

/// Unit codes as reported, for debug logging only.
pub(crate) fn unit_codes<'a>(p: &'a ObservationProperties) -> [Option<&'a str>; 5] {
    let code = |q: &'a Quantity| -> Option<&'a str> { q.unit_code.as_deref() };
    [
        code(&p.temperature),
        code(&p.wind_speed),
        code(&p.visibility),
        code(&p.wind_chill),
        code(&p.relative_humidity),
    ]
}
