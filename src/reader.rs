//! Lazy, single-pass iteration over the image series of an OME-XML document

use log::{debug, trace};

use crate::dom::{self, Element, Namespaces};
use crate::error::OmeError;
use crate::extract::extract_series;
use crate::models::SeriesMetadata;

/// Reader over the image series of one OME-XML document.
///
/// Construction parses the document once, resolves the namespace map once,
/// and locates every `Image` element; per-series extraction is deferred to
/// each [`Iterator::next`] call. The sequence is finite, single-pass, and
/// non-restartable: once exhausted it stays exhausted. A reader is owned by
/// one call site; to process many documents concurrently, construct one
/// reader per document.
///
/// # Example
///
/// ```
/// let xml = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2016-06">
///   <Image ID="Image:0" Name="decon.dv">
///     <Pixels ID="Pixels:0" DimensionOrder="XYZTC" Type="uint16"
///             SizeX="960" SizeY="960" SizeZ="1" SizeC="1" SizeT="1"/>
///   </Image>
/// </OME>"#;
///
/// let mut reader = ome_meta::read(xml)?;
/// assert_eq!(reader.series_count(), 1);
/// let series = reader.next().unwrap()?;
/// assert_eq!(series.id, "Image:0");
/// assert_eq!(series.sizex, 960);
/// # Ok::<(), ome_meta::OmeError>(())
/// ```
pub struct OmeXmlReader {
    xml: String,
    namespaces: Namespaces,
    series: Vec<Element>,
    position: usize,
}

impl OmeXmlReader {
    /// Parse an OME-XML document and position the reader before its first
    /// series.
    ///
    /// Fails with [`OmeError::Xml`] or [`OmeError::InvalidStructure`] when
    /// the document text is not well-formed XML. A well-formed document with
    /// zero `Image` elements is not an error; the reader is simply empty.
    pub fn parse(xml: impl Into<String>) -> Result<Self, OmeError> {
        let xml = xml.into();
        let root = dom::parse(&xml)?;
        let namespaces = dom::resolve_namespaces(&root);
        let series = root.into_children("ome:Image", &namespaces);

        debug!(
            "parsed OME-XML document: {} series, ome namespace {:?}",
            series.len(),
            namespaces.get("ome")
        );

        Ok(Self {
            xml,
            namespaces,
            series,
            position: 0,
        })
    }

    /// Total number of series in the document. Known at construction;
    /// unaffected by iteration.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// The verbatim document text this reader was built from.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// The resolved namespace prefix → URI map (`ome` and `sa`).
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }
}

impl std::fmt::Debug for OmeXmlReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmeXmlReader")
            .field("series_count", &self.series.len())
            .field("position", &self.position)
            .finish()
    }
}

impl Iterator for OmeXmlReader {
    type Item = Result<SeriesMetadata, OmeError>;

    /// Extract the series at the cursor and advance. A failed extraction
    /// still advances the cursor: the same element is never retried.
    fn next(&mut self) -> Option<Self::Item> {
        let element = self.series.get(self.position)?;
        let record = extract_series(element, &self.namespaces);
        trace!(
            "extracted series {}/{}",
            self.position + 1,
            self.series.len()
        );
        self.position += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.series.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OmeXmlReader {}

/// Parse an OME-XML document into an [`OmeXmlReader`].
///
/// Convenience entry point; equivalent to [`OmeXmlReader::parse`].
pub fn read(xml: impl Into<String>) -> Result<OmeXmlReader, OmeError> {
    OmeXmlReader::parse(xml)
}
