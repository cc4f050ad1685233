pub mod config;
pub mod json_writer;
pub mod telemetry;

pub use crate::config::ServiceConfig;
pub use crate::json_writer::JsonFileWriter;
pub use crate::telemetry::{init_telemetry, TelemetryConfig};
