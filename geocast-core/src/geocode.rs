use tracing::{debug, info};

use crate::{
    GeoCode,
    error::Error,
    fetch::{Fetch, build_url},
};

/// Look up `place` and return every candidate in the order the API sent them.
///
/// Candidates are not filtered, ranked or deduplicated.
pub async fn resolve_geocodes(
    fetcher: &dyn Fetch,
    geocode_api_url: &str,
    place: &str,
) -> Result<Vec<GeoCode>, Error> {
    info!("Fetching geo codes for: {place}");

    let url = build_url(geocode_api_url, &[("q", place)])?;
    let body = fetcher.fetch(&url).await?;
    let candidates = decode_geocodes(&body)?;

    debug!("Geocoder returned {} candidate(s)", candidates.len());
    Ok(candidates)
}

fn decode_geocodes(body: &[u8]) -> Result<Vec<GeoCode>, Error> {
    Ok(serde_json::from_slice(body)?)
}
