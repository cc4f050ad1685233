use crate::record::Record;
use crate::types::{Coordinate, GpsFix};
use tracing::warn;

/// Parse a coordinate field.
///
/// Empty text is kept as-is without complaint. Text that is not a finite
/// number is kept as-is and logged.
pub fn parse_coordinate(field: &str, text: &str) -> Coordinate {
    if text.is_empty() {
        return Coordinate::Unparsed(String::new());
    }

    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Coordinate::Degrees(value),
        _ => {
            warn!(field = field, value = text, "Could not parse long/lat");
            Coordinate::Unparsed(text.to_string())
        }
    }
}

/// Reduce GPS event records to `(timestamp, deployment_id, lat, long)` fixes.
///
/// The longitude is only converted once the latitude was; a latitude that is
/// not a number leaves both coordinates as text.
pub fn transform_gps(events: &[Record]) -> Vec<GpsFix> {
    events.iter().map(transform_event).collect()
}

fn transform_event(event: &Record) -> GpsFix {
    let lat = event.field("location_lat");
    let long = event.field("location_long");

    let latitude = parse_coordinate("location_lat", lat);
    let lat_failed = !lat.is_empty() && lat.trim().parse::<f64>().is_err();
    let longitude = if lat_failed {
        Coordinate::Unparsed(long.to_string())
    } else {
        parse_coordinate("location_long", long)
    };

    GpsFix {
        timestamp: event.field("timestamp").to_string(),
        deployment_id: event.field("deployment_id").to_string(),
        latitude,
        longitude,
    }
}
