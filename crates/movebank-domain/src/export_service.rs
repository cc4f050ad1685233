use crate::acc::AccTransform;
use crate::document_writer::DocumentWriter;
use crate::entity_service::{studies_by_sensor, EntityService};
use crate::error::DomainResult;
use crate::gps::transform_gps;
use crate::record::Record;
use crate::types::{
    EventQuery, MovebankDocument, ACC_SENSOR_TYPE_ID, EXPORT_STUDY_ID, GPS_SENSOR_NAME,
    GPS_SENSOR_TYPE_ID,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// What a run exports
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub study_id: String,
    pub sensor_name: String,
    pub gps_sensor_type_id: String,
    pub acc_sensor_type_id: String,
    pub acc_transform: AccTransform,
}

impl Default for ExportPlan {
    fn default() -> Self {
        Self {
            study_id: EXPORT_STUDY_ID.to_string(),
            sensor_name: GPS_SENSOR_NAME.to_string(),
            gps_sensor_type_id: GPS_SENSOR_TYPE_ID.to_string(),
            acc_sensor_type_id: ACC_SENSOR_TYPE_ID.to_string(),
            acc_transform: AccTransform::default(),
        }
    }
}

/// Domain service that runs the fetch → transform → write pipeline
///
/// Flow:
/// 1. Fetch all visible studies and keep those with the sensor
/// 2. Fetch the individuals of the planned study
/// 3. Fetch GPS and ACC events of the first individual and transform them
/// 4. Write the assembled document
///
/// A failed step contributes no data; it never aborts the run.
pub struct ExportService {
    entities: EntityService,
    writer: Arc<dyn DocumentWriter>,
    plan: ExportPlan,
}

impl ExportService {
    pub fn new(entities: EntityService, writer: Arc<dyn DocumentWriter>, plan: ExportPlan) -> Self {
        Self {
            entities,
            writer,
            plan,
        }
    }

    /// Collect the document and write it
    pub async fn run(&self) -> DomainResult<MovebankDocument> {
        let document = self.collect().await;
        self.writer.write(&document)?;

        info!(
            studies = document.all_studies.len(),
            individuals = document.individuals.len(),
            gps_events = document.gps_events.as_ref().map_or(0, Vec::len),
            acc_events = document.acc_events.as_ref().map_or(0, Vec::len),
            "Export written"
        );
        Ok(document)
    }

    #[instrument(skip(self), fields(study_id = %self.plan.study_id))]
    pub async fn collect(&self) -> MovebankDocument {
        let all_studies = or_empty("studies", self.entities.fetch_studies().await);
        let gps_studies = studies_by_sensor(&all_studies, &self.plan.sensor_name);
        info!(
            all_studies = all_studies.len(),
            gps_studies = gps_studies.len(),
            "Fetched studies"
        );

        let individuals = or_empty(
            "individuals",
            self.entities.fetch_individuals(&self.plan.study_id).await,
        );

        let mut document = MovebankDocument {
            all_studies,
            gps_studies,
            individuals,
            gps_events: None,
            acc_events: None,
        };

        let Some(individual_id) = document.individuals.first().map(|i| i.field("id").to_string())
        else {
            info!("Study has no individuals, skipping events");
            return document;
        };

        let gps_events = self.fetch_events(&individual_id, &self.plan.gps_sensor_type_id).await;
        if !gps_events.is_empty() {
            document.gps_events = Some(transform_gps(&gps_events));
        }

        let acc_events = self.fetch_events(&individual_id, &self.plan.acc_sensor_type_id).await;
        if !acc_events.is_empty() {
            match self.plan.acc_transform.transform_flat(&acc_events) {
                Ok(samples) => document.acc_events = Some(samples),
                Err(e) => error!(error = %e, "Failed to transform acceleration events"),
            }
        }

        document
    }

    async fn fetch_events(&self, individual_id: &str, sensor_type_id: &str) -> Vec<Record> {
        let query = EventQuery::all_attributes(&self.plan.study_id, individual_id, sensor_type_id);
        or_empty("events", self.entities.fetch_events(&query).await)
    }
}

fn or_empty(step: &str, result: DomainResult<Vec<Record>>) -> Vec<Record> {
    result.unwrap_or_else(|e| {
        error!(step = step, error = %e, "Fetch failed, continuing without data");
        Vec::new()
    })
}
