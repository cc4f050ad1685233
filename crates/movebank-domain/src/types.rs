use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Study exported by the fixed pipeline
pub const EXPORT_STUDY_ID: &str = "9493874";

/// Sensor type id of GPS events
pub const GPS_SENSOR_TYPE_ID: &str = "653";

/// Sensor type id of e-obs acceleration events
pub const ACC_SENSOR_TYPE_ID: &str = "2365683";

/// Sensor name matched against `sensor_type_ids` of a study
pub const GPS_SENSOR_NAME: &str = "GPS";

pub const OUTPUT_FILE_NAME: &str = "movebank_data.json";

/// Latitude or longitude of a GPS fix.
///
/// Empty and unparseable fields keep their original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Degrees(f64),
    Unparsed(String),
}

impl Coordinate {
    pub fn as_degrees(&self) -> Option<f64> {
        match self {
            Coordinate::Degrees(value) => Some(*value),
            Coordinate::Unparsed(_) => None,
        }
    }
}

/// GPS event reduced to `(timestamp, deployment_id, lat, long)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "(String, String, Coordinate, Coordinate)",
    into = "(String, String, Coordinate, Coordinate)"
)]
pub struct GpsFix {
    pub timestamp: String,
    pub deployment_id: String,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl From<(String, String, Coordinate, Coordinate)> for GpsFix {
    fn from(
        (timestamp, deployment_id, latitude, longitude): (String, String, Coordinate, Coordinate),
    ) -> Self {
        Self {
            timestamp,
            deployment_id,
            latitude,
            longitude,
        }
    }
}

impl From<GpsFix> for (String, String, Coordinate, Coordinate) {
    fn from(fix: GpsFix) -> Self {
        (fix.timestamp, fix.deployment_id, fix.latitude, fix.longitude)
    }
}

/// One calibrated tri-axial acceleration sample `(timestamp, deployment_id, x, y, z)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "(String, String, f64, f64, f64)",
    into = "(String, String, f64, f64, f64)"
)]
pub struct AccSample {
    pub timestamp: String,
    pub deployment_id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<(String, String, f64, f64, f64)> for AccSample {
    fn from((timestamp, deployment_id, x, y, z): (String, String, f64, f64, f64)) -> Self {
        Self {
            timestamp,
            deployment_id,
            x,
            y,
            z,
        }
    }
}

impl From<AccSample> for (String, String, f64, f64, f64) {
    fn from(sample: AccSample) -> Self {
        (
            sample.timestamp,
            sample.deployment_id,
            sample.x,
            sample.y,
            sample.z,
        )
    }
}

/// Everything collected by one export run.
///
/// `gps_events` and `acc_events` are absent when the individual had no such
/// events (or none could be fetched).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovebankDocument {
    pub all_studies: Vec<Record>,
    pub gps_studies: Vec<Record>,
    pub individuals: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_events: Option<Vec<GpsFix>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acc_events: Option<Vec<AccSample>>,
}

/// Parameters of an event request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub study_id: String,
    pub individual_id: String,
    pub sensor_type_id: String,
    pub attributes: String,
}

impl EventQuery {
    /// Query for every attribute of the individual's events of one sensor type
    pub fn all_attributes(
        study_id: impl Into<String>,
        individual_id: impl Into<String>,
        sensor_type_id: impl Into<String>,
    ) -> Self {
        Self {
            study_id: study_id.into(),
            individual_id: individual_id.into(),
            sensor_type_id: sensor_type_id.into(),
            attributes: "all".to_string(),
        }
    }
}
