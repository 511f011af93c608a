use tracing::{debug, info, warn};

use crate::{
    Config, Resolution,
    error::ResolveError,
    fetch::Fetch,
    forecast::resolve_forecast,
    geocode::resolve_geocodes,
};

/// Resolve `place` to a single location and fetch its forecast.
///
/// Zero or several geocoding candidates end the lookup early with
/// [`Resolution::NoMatch`] or [`Resolution::Ambiguous`]; the forecast API is
/// only called when exactly one candidate came back.
pub async fn resolve(
    config: &Config,
    fetcher: &dyn Fetch,
    place: &str,
) -> Result<Resolution, ResolveError> {
    let mut candidates = resolve_geocodes(fetcher, &config.geocode_api_url, place)
        .await
        .map_err(ResolveError::Geocode)?;

    let location = match candidates.len() {
        0 => {
            info!("No geo code matched '{place}'");
            return Ok(Resolution::NoMatch);
        }
        1 => candidates.remove(0),
        n => {
            warn!("'{place}' matched {n} locations, refusing to guess");
            return Ok(Resolution::Ambiguous(candidates));
        }
    };

    debug!(
        "Resolved '{place}' to {} ({}, {})",
        location.display_name, location.latitude, location.longitude
    );

    let forecast = resolve_forecast(
        fetcher,
        &config.forecast_api_url,
        &location.latitude,
        &location.longitude,
    )
    .await
    .map_err(ResolveError::Forecast)?;

    Ok(Resolution::Forecast { location, forecast })
}
