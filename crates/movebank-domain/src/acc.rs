//! Calibration of raw e-obs tri-axial acceleration bursts.
//!
//! A burst carries `X Y Z X Y Z ...` raw 12-bit samples taken at a fixed
//! per-axis frequency from the burst's start timestamp. Each triple becomes
//! one [`AccSample`] with an interpolated timestamp and the raw counts
//! converted to m/s² (or g).

use crate::error::{DomainError, DomainResult};
use crate::record::Record;
use crate::types::AccSample;
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

/// Raw value of zero acceleration on the 12-bit ADC
pub const RAW_CENTER: i64 = 2048;

pub const STANDARD_GRAVITY: f64 = 9.81;

/// Format of burst and sample timestamps
pub const ACC_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

// Accepts any number of fractional digits, including none.
const ACC_TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Last tag of the first e-obs generation
pub const FIRST_GENERATION_MAX_TAG: i64 = 2241;

/// Last tag of the second e-obs generation
pub const SECOND_GENERATION_MAX_TAG: i64 = 4117;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccUnit {
    #[default]
    MetersPerSecondSquared,
    G,
}

impl AccUnit {
    pub fn factor(self) -> f64 {
        match self {
            AccUnit::MetersPerSecondSquared => STANDARD_GRAVITY,
            AccUnit::G => 1.0,
        }
    }
}

/// Sensitivity mode of first generation tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sensitivity {
    #[default]
    High,
    Low,
}

/// Slope in g per raw count for a tag
pub fn calibration_slope(tag_local_identifier: i64, sensitivity: Sensitivity) -> f64 {
    if tag_local_identifier <= FIRST_GENERATION_MAX_TAG {
        match sensitivity {
            Sensitivity::High => 0.001,
            Sensitivity::Low => 0.0027,
        }
    } else if tag_local_identifier <= SECOND_GENERATION_MAX_TAG {
        0.0022
    } else {
        1.0 / 512.0
    }
}

/// Converts acceleration burst records into calibrated samples
#[derive(Debug, Clone, Copy, Default)]
pub struct AccTransform {
    unit: AccUnit,
    sensitivity: Sensitivity,
}

impl AccTransform {
    pub fn new(unit: AccUnit, sensitivity: Sensitivity) -> Self {
        Self { unit, sensitivity }
    }

    /// Transform every burst, keeping one sample sequence per burst.
    ///
    /// The slope is chosen once from the first burst's `tag_local_identifier`
    /// and applied to the whole batch.
    pub fn transform(&self, bursts: &[Record]) -> DomainResult<Vec<Vec<AccSample>>> {
        let Some(first) = bursts.first() else {
            return Ok(Vec::new());
        };

        let tag = parse_field::<i64>(first, "tag_local_identifier")?;
        let slope = calibration_slope(tag, self.sensitivity);

        debug!(
            tag_local_identifier = tag,
            slope = slope,
            unit = ?self.unit,
            bursts = bursts.len(),
            "Calibrating acceleration bursts"
        );

        bursts
            .iter()
            .map(|burst| self.transform_burst(burst, slope))
            .collect()
    }

    /// Transform every burst into one flat, burst-ordered sample sequence
    pub fn transform_flat(&self, bursts: &[Record]) -> DomainResult<Vec<AccSample>> {
        Ok(self.transform(bursts)?.into_iter().flatten().collect())
    }

    fn transform_burst(&self, burst: &Record, slope: f64) -> DomainResult<Vec<AccSample>> {
        let deployment_id = burst.field("deployment_id");
        let frequency =
            parse_field::<f64>(burst, "eobs_acceleration_sampling_frequency_per_axis")?;
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(DomainError::InvalidAccelerationRecord(format!(
                "sampling frequency must be positive, got {}",
                frequency
            )));
        }
        let period = 1.0 / frequency;

        let start = parse_timestamp(burst.field("timestamp"))?;
        let raw = parse_raw_samples(burst.field("eobs_accelerations_raw"))?;
        let unit_factor = self.unit.factor();
        let calibrate = |value: i64| (value - RAW_CENTER) as f64 * slope * unit_factor;

        // A trailing partial triple is dropped.
        raw.chunks_exact(3)
            .enumerate()
            .map(|(i, xyz)| -> DomainResult<AccSample> {
                let ts = sample_offset(period, i)
                    .and_then(|offset| start.checked_add_signed(offset))
                    .ok_or_else(|| {
                        DomainError::InvalidAccelerationRecord(format!(
                            "sample {} at {} Hz is out of timestamp range",
                            i, frequency
                        ))
                    })?;

                Ok(AccSample {
                    timestamp: ts.format(ACC_TIMESTAMP_FORMAT).to_string(),
                    deployment_id: deployment_id.to_string(),
                    x: calibrate(xyz[0]),
                    y: calibrate(xyz[1]),
                    z: calibrate(xyz[2]),
                })
            })
            .collect()
    }
}

/// Offset of the i-th sample from the burst start, rounded to microseconds.
///
/// `None` when the offset does not fit a `Duration`.
fn sample_offset(period: f64, index: usize) -> Option<Duration> {
    let micros = (period * index as f64 * 1_000_000.0).round();
    if micros.is_finite() && micros.abs() < i64::MAX as f64 {
        Some(Duration::microseconds(micros as i64))
    } else {
        None
    }
}

fn parse_timestamp(text: &str) -> DomainResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, ACC_TIMESTAMP_PARSE_FORMAT).map_err(|e| {
        DomainError::InvalidAccelerationRecord(format!("timestamp '{}': {}", text, e))
    })
}

fn parse_raw_samples(text: &str) -> DomainResult<Vec<i64>> {
    text.split_whitespace()
        .map(|value| {
            value.parse::<i64>().map_err(|e| {
                DomainError::InvalidAccelerationRecord(format!("raw sample '{}': {}", value, e))
            })
        })
        .collect()
}

fn parse_field<T>(record: &Record, field: &str) -> DomainResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let text = record.field(field);
    text.trim().parse::<T>().map_err(|e| {
        DomainError::InvalidAccelerationRecord(format!("{} '{}': {}", field, text, e))
    })
}
