use crate::direct_read::{params, DirectReadApi};
use crate::error::DomainResult;
use crate::record::{parse_records, Record};
use crate::types::EventQuery;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fetches studies, individuals and events from the direct-read endpoint
pub struct EntityService {
    api: Arc<dyn DirectReadApi>,
}

impl EntityService {
    pub fn new(api: Arc<dyn DirectReadApi>) -> Self {
        Self { api }
    }

    /// Fetch every study whose data the caller can fully see
    #[instrument(skip(self))]
    pub async fn fetch_studies(&self) -> DomainResult<Vec<Record>> {
        let text = self
            .api
            .call(params([
                ("entity_type", "study"),
                ("i_can_see_data", "true"),
                ("there_are_data_which_i_cannot_see", "false"),
            ]))
            .await;

        // The service is asked for these flags already; re-check them anyway.
        let studies: Vec<Record> = parse_records(&text)?
            .into_iter()
            .filter(|s| {
                s.field("i_can_see_data") == "true"
                    && s.field("there_are_data_which_i_cannot_see") == "false"
            })
            .collect();

        debug!(count = studies.len(), "Fetched studies");
        Ok(studies)
    }

    #[instrument(skip(self))]
    pub async fn fetch_individuals(&self, study_id: &str) -> DomainResult<Vec<Record>> {
        let text = self
            .api
            .call(params([("entity_type", "individual"), ("study_id", study_id)]))
            .await;

        let individuals = parse_records(&text)?;
        debug!(count = individuals.len(), "Fetched individuals");
        Ok(individuals)
    }

    #[instrument(
        skip(self, query),
        fields(
            study_id = %query.study_id,
            individual_id = %query.individual_id,
            sensor_type_id = %query.sensor_type_id,
        )
    )]
    pub async fn fetch_events(&self, query: &EventQuery) -> DomainResult<Vec<Record>> {
        let text = self
            .api
            .call(params([
                ("entity_type", "event"),
                ("study_id", query.study_id.as_str()),
                ("individual_id", query.individual_id.as_str()),
                ("sensor_type_id", query.sensor_type_id.as_str()),
                ("attributes", query.attributes.as_str()),
            ]))
            .await;

        let events = parse_records(&text)?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }
}

/// Keep studies whose `sensor_type_ids` mention `sensor_name`
pub fn studies_by_sensor(studies: &[Record], sensor_name: &str) -> Vec<Record> {
    studies
        .iter()
        .filter(|s| s.field("sensor_type_ids").contains(sensor_name))
        .cloned()
        .collect()
}
