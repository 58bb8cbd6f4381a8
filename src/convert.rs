//! Key-value projection of metadata records
//!
//! Downstream consumers often want a loosely-typed nested mapping rather
//! than the record structs. The projection is a pure function of the record:
//! calling it repeatedly always yields the current field values, and nothing
//! is mutated. Conversion lives here, not on the record types, so channel
//! and plane records are each convertible on their own.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::OmeError;
use crate::models::{ChannelMetadata, PlaneMetadata, SeriesMetadata};

/// Project any record into a `field name → value` map. Nested record
/// sequences become arrays of maps, preserving source order.
pub fn to_map<T: Serialize>(record: &T) -> Result<Map<String, Value>, OmeError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(OmeError::InvalidStructure(format!(
            "record projected to non-map JSON value: {other}"
        ))),
    }
}

/// Project a series record, including its nested `channels` and `planes`.
pub fn series_to_map(series: &SeriesMetadata) -> Result<Map<String, Value>, OmeError> {
    to_map(series)
}

/// Project a single channel record.
pub fn channel_to_map(channel: &ChannelMetadata) -> Result<Map<String, Value>, OmeError> {
    to_map(channel)
}

/// Project a single plane record.
pub fn plane_to_map(plane: &PlaneMetadata) -> Result<Map<String, Value>, OmeError> {
    to_map(plane)
}
