use geocast_core::Resolution;
use std::io::{self, Write};

pub const USAGE_HINT: &str = r#"Missing parameter. Try running the following: weather "Stockholm, Stockholms kommun, Stockholm County, 111 29, Sweden""#;

pub const NO_MATCH: &str = "Found no matches, try again with a different parameter.";

pub const AMBIGUOUS: &str =
    "Found multiple matches for your search. Try again with one of the following:";

/// Print the outcome of a lookup for `query`.
pub fn write_report<W: Write>(
    out: &mut W,
    query: &str,
    resolution: &Resolution,
) -> io::Result<()> {
    match resolution {
        Resolution::NoMatch => writeln!(out, "{NO_MATCH}"),
        Resolution::Ambiguous(candidates) => {
            writeln!(out, "{AMBIGUOUS}")?;
            for candidate in candidates {
                writeln!(out, "{}", candidate.display_name)?;
            }
            Ok(())
        }
        Resolution::Forecast { forecast, .. } => {
            writeln!(out, "Expected forecast for {query}")?;
            writeln!(out, "At {}", forecast.timestamp)?;
            writeln!(out, "Temp: {}°C", forecast.air_temperature_c)?;
            writeln!(out, "Windspeed: {}m/s", forecast.wind_speed_ms)?;
            writeln!(
                out,
                "Precipitation within the next hour: {}mm",
                forecast.precipitation_mm
            )
        }
    }
}
