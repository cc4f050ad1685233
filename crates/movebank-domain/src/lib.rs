pub mod acc;
pub mod direct_read;
pub mod document_writer;
pub mod entity_service;
pub mod error;
pub mod export_service;
pub mod gps;
pub mod record;
pub mod types;

pub use acc::{calibration_slope, AccTransform, AccUnit, Sensitivity};
pub use direct_read::{params, DirectReadApi, DirectReadParams};
pub use document_writer::DocumentWriter;
pub use entity_service::{studies_by_sensor, EntityService};
pub use error::{DomainError, DomainResult};
pub use export_service::{ExportPlan, ExportService};
pub use gps::{parse_coordinate, transform_gps};
pub use record::{parse_records, Record};
pub use types::*;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use direct_read::MockDirectReadApi;
#[cfg(any(test, feature = "testing"))]
pub use document_writer::MockDocumentWriter;
