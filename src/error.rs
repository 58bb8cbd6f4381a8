//! Error types for OME-XML metadata extraction

/// Errors that can occur while parsing an OME-XML document or extracting
/// series metadata from it.
///
/// End-of-sequence is *not* an error: the series iterator signals it by
/// returning `None`.
#[derive(Debug, thiserror::Error)]
pub enum OmeError {
    /// Malformed XML document text
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed prefix but structurally unusable input (truncated
    /// document, no root element)
    #[error("Invalid OME-XML structure: {0}")]
    InvalidStructure(String),

    /// A required attribute the schema guarantees is missing
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// A required child element the schema guarantees is missing
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// An attribute value that failed numeric coercion
    #[error("Invalid attribute value: {0}")]
    InvalidAttributeValue(String),

    /// Non-UTF-8 bytes in an element or attribute name/value
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Key-value projection of a record failed to serialize
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
