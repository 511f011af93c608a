use serde::{Deserialize, Deserializer};

/// One candidate location returned by the geocoding API.
///
/// Coordinates are kept as the text the API sent; they are only ever written
/// back into the forecast query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoCode {
    #[serde(rename = "lat", default, deserialize_with = "coordinate")]
    pub latitude: String,
    #[serde(rename = "lon", default, deserialize_with = "coordinate")]
    pub longitude: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

impl GeoCode {
    /// Build a candidate from already-known parts.
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            display_name: display_name.into(),
        }
    }
}

/// First upcoming data point of a forecast time-series.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub timestamp: String,
    pub air_temperature_c: f64,
    pub wind_speed_ms: f64,
    pub precipitation_mm: f64,
}

/// Non-fatal end states of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The geocoder knows no place by that name.
    NoMatch,
    /// More than one place matched; candidates are in API order.
    Ambiguous(Vec<GeoCode>),
    /// Exactly one place matched and its forecast was fetched.
    Forecast { location: GeoCode, forecast: Forecast },
}

/// Reads `null` as the type's default, the same as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Accepts "59.33", 59.33 and null alike.
fn coordinate<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
