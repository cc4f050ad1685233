use crate::error::{DomainError, DomainResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of a direct-read response, keyed by the header row.
///
/// Field order follows the header so a dumped record reads the same way the
/// service returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns the field or an empty string when the column is absent
    pub fn field(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse comma-delimited text with a header row into records.
///
/// Empty text yields no records. Short rows are padded with empty strings,
/// surplus columns are dropped.
pub fn parse_records(text: &str) -> DomainResult<Vec<Record>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::MalformedResponse(e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_values = result.map_err(|e| DomainError::MalformedResponse(e.to_string()))?;

        if row_values.len() > headers.len() {
            warn!(
                row = row + 1,
                columns = row_values.len(),
                header_columns = headers.len(),
                "Dropping surplus columns"
            );
        }

        let record = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, row_values.get(i).unwrap_or_default()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_text_yields_no_records() {
        let records = parse_records("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_header_only_yields_no_records() {
        let records = parse_records("id,name\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_maps_columns_by_header_position() {
        let text = "id,name,sensor_type_ids\n1,Storks,\"GPS,Acceleration\"\n2,Gulls,GPS\n";
        let records = parse_records(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some("1"));
        assert_eq!(records[0].get("sensor_type_ids"), Some("GPS,Acceleration"));
        assert_eq!(records[1].get("name"), Some("Gulls"));
    }

    #[test]
    fn test_parse_keeps_header_order() {
        let records = parse_records("zeta,alpha,mid\nz,a,m\n").unwrap();
        let keys: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_ragged_rows() {
        let records = parse_records("a,b,c\n1,2\n4,5,6,7\n").unwrap();

        assert_eq!(records[0].get("c"), Some(""));
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[1].get("c"), Some("6"));
    }

    #[test]
    fn test_field_defaults_to_empty() {
        let record: Record = [("id", "7")].into_iter().collect();
        assert_eq!(record.field("id"), "7");
        assert_eq!(record.field("missing"), "");
    }

    #[test]
    fn test_record_serializes_as_json_object() {
        let record: Record = [("id", "7"), ("name", "Café")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"7","name":"Café"}"#);
    }
}
