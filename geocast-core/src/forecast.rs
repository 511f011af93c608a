use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    Forecast,
    error::Error,
    fetch::{Fetch, build_url},
    model::null_as_default,
};

/// Fetch the forecast for a coordinate pair and keep only its first entry.
///
/// A malformed body and an empty time-series are both reported as
/// [`Error::UnexpectedFormat`].
pub async fn resolve_forecast(
    fetcher: &dyn Fetch,
    forecast_api_url: &str,
    lat: &str,
    lon: &str,
) -> Result<Forecast, Error> {
    info!("Fetching forecast for lat={lat} lon={lon}");

    let url = build_url(forecast_api_url, &[("lat", lat), ("lon", lon)])?;
    let body = fetcher.fetch(&url).await?;
    let forecast = decode_forecast(&body)?;

    debug!("First forecast entry: {forecast:?}");
    Ok(forecast)
}

fn decode_forecast(body: &[u8]) -> Result<Forecast, Error> {
    let parsed: FcResponse = serde_json::from_slice(body)
        .map_err(|e| Error::UnexpectedFormat(format!("malformed forecast body: {e}")))?;

    let first = parsed
        .properties
        .timeseries
        .into_iter()
        .next()
        .ok_or_else(|| Error::UnexpectedFormat("forecast time-series is empty".to_string()))?;

    Ok(Forecast {
        timestamp: first.time,
        air_temperature_c: first.data.instant.details.air_temperature,
        wind_speed_ms: first.data.instant.details.wind_speed,
        precipitation_mm: first.data.next_1_hours.details.precipitation_amount,
    })
}

// Every level defaults: absent or null values read as zero, not as an error.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcResponse {
    #[serde(deserialize_with = "null_as_default")]
    properties: FcProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcProperties {
    #[serde(deserialize_with = "null_as_default")]
    timeseries: Vec<FcEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcEntry {
    #[serde(deserialize_with = "null_as_default")]
    time: String,
    #[serde(deserialize_with = "null_as_default")]
    data: FcData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcData {
    #[serde(deserialize_with = "null_as_default")]
    instant: FcInstant,
    #[serde(deserialize_with = "null_as_default")]
    next_1_hours: FcNextHour,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcInstant {
    #[serde(deserialize_with = "null_as_default")]
    details: FcInstantDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcInstantDetails {
    #[serde(deserialize_with = "null_as_default")]
    air_temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    wind_speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcNextHour {
    #[serde(deserialize_with = "null_as_default")]
    details: FcNextHourDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FcNextHourDetails {
    #[serde(deserialize_with = "null_as_default")]
    precipitation_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubFetcher;

    const BASE: &str = "https://forecast.example.com/compact";

    const TWO_ENTRIES: &str = r#"{
        "type": "Feature",
        "properties": {
            "meta": {"updated_at": "2024-01-01T11:31:12Z"},
            "timeseries": [
                {
                    "time": "2024-01-01T12:00:00Z",
                    "data": {
                        "instant": {"details": {"air_temperature": 5.2, "wind_speed": 3.1, "relative_humidity": 80.0}},
                        "next_1_hours": {"details": {"precipitation_amount": 0.4}}
                    }
                },
                {
                    "time": "2024-01-01T13:00:00Z",
                    "data": {
                        "instant": {"details": {"air_temperature": 9.9, "wind_speed": 9.9}},
                        "next_1_hours": {"details": {"precipitation_amount": 9.9}}
                    }
                }
            ]
        }
    }"#;

    #[tokio::test]
    async fn takes_only_the_first_entry() {
        let fetcher = StubFetcher::new().respond(TWO_ENTRIES);

        let forecast = resolve_forecast(&fetcher, BASE, "59.33", "18.06").await.unwrap();

        assert_eq!(
            forecast,
            Forecast {
                timestamp: "2024-01-01T12:00:00Z".into(),
                air_temperature_c: 5.2,
                wind_speed_ms: 3.1,
                precipitation_mm: 0.4,
            }
        );
        assert_eq!(
            fetcher.requests(),
            ["https://forecast.example.com/compact?lat=59.33&lon=18.06"]
        );
    }

    #[tokio::test]
    async fn absent_values_default_to_zero() {
        let fetcher = StubFetcher::new().respond(
            r#"{"properties":{"timeseries":[{"time":"2024-06-01T00:00:00Z","data":{"instant":{"details":{"air_temperature":-1.5}}}}]}}"#,
        );

        let forecast = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap();

        assert_eq!(forecast.timestamp, "2024-06-01T00:00:00Z");
        assert_eq!(forecast.air_temperature_c, -1.5);
        assert_eq!(forecast.wind_speed_ms, 0.0);
        assert_eq!(forecast.precipitation_mm, 0.0);
    }

    #[tokio::test]
    async fn null_values_default_to_zero() {
        let fetcher = StubFetcher::new().respond(
            r#"{"properties":{"timeseries":[{
                "time":"2024-06-01T00:00:00Z",
                "data":{
                    "instant":{"details":{"air_temperature":4.0,"wind_speed":null}},
                    "next_1_hours":null
                }
            }]}}"#,
        );

        let forecast = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap();

        assert_eq!(forecast.air_temperature_c, 4.0);
        assert_eq!(forecast.wind_speed_ms, 0.0);
        assert_eq!(forecast.precipitation_mm, 0.0);
    }

    #[tokio::test]
    async fn null_series_is_unexpected_format() {
        let fetcher = StubFetcher::new().respond(r#"{"properties":{"timeseries":null}}"#);

        let err = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap_err();

        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn empty_series_is_unexpected_format() {
        let fetcher = StubFetcher::new().respond(r#"{"properties":{"timeseries":[]}}"#);

        let err = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedFormat(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn missing_properties_is_unexpected_format() {
        let fetcher = StubFetcher::new().respond("{}");

        let err = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedFormat(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_unexpected_format() {
        let fetcher = StubFetcher::new().respond("<html>503</html>");

        let err = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedFormat(_)));
        assert!(err.to_string().starts_with("Unexpected API format"));
    }

    #[tokio::test]
    async fn wrong_value_type_is_unexpected_format() {
        let fetcher = StubFetcher::new().respond(
            r#"{"properties":{"timeseries":[{"time":"t","data":{"instant":{"details":{"air_temperature":"warm"}}}}]}}"#,
        );

        let err = resolve_forecast(&fetcher, BASE, "1", "2").await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedFormat(_)));
    }
}
