//! Batch output records.

use serde::Serialize;

use crate::geocoding::{CallResult, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Found,
    NotFound,
}

/// One line of the output array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord<'a> {
    pub address: &'a str,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a Location>,
}

impl<'a> From<&'a CallResult> for LocationRecord<'a> {
    fn from(result: &'a CallResult) -> Self {
        match result {
            CallResult::Found { address, location } => Self {
                address,
                status: RecordStatus::Found,
                location: Some(location),
            },
            CallResult::NotFound { address } => Self {
                address,
                status: RecordStatus::NotFound,
                location: None,
            },
        }
    }
}

/// Render results as a JSON array, preserving order.
pub fn render_json(results: &[CallResult], pretty: bool) -> serde_json::Result<String> {
    let records: Vec<LocationRecord<'_>> = results.iter().map(LocationRecord::from).collect();
    if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
}
