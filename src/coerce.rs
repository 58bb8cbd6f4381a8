//! Typed coercion of optional attribute values
//!
//! OME-XML attributes arrive as strings that may simply not be present.
//! These helpers turn an optional raw value into an optional typed value:
//! absence propagates as `None` rather than becoming a silent default.

use crate::error::OmeError;

/// Coerce an optional attribute value to a boolean.
///
/// Only the exact, case-sensitive literal `"true"` maps to `true`; any other
/// present string (including `"True"` and `"1"`) maps to `false`. This
/// mirrors the behavior downstream consumers already rely on, so it is kept
/// as-is rather than widened to the full xsd:boolean lexical space.
pub fn boolean(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| value == "true")
}

/// Coerce an optional attribute value to a base-10 integer.
pub fn integer(raw: Option<&str>) -> Result<Option<i64>, OmeError> {
    raw.map(|value| {
        value
            .parse::<i64>()
            .map_err(|_| OmeError::InvalidAttributeValue(value.to_string()))
    })
    .transpose()
}

/// Coerce an optional attribute value to a floating-point number.
pub fn float(raw: Option<&str>) -> Result<Option<f64>, OmeError> {
    raw.map(|value| {
        value
            .parse::<f64>()
            .map_err(|_| OmeError::InvalidAttributeValue(value.to_string()))
    })
    .transpose()
}
