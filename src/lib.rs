//! # ome-meta - Typed access to OME-XML image series metadata
//!
//! `ome_meta` extracts structured metadata from OME-XML microscopy metadata
//! documents: per-series dimensions and pixel encoding, channel acquisition
//! settings, and per-plane parameters such as exposure and stage position.
//!
//! ## Key Features
//!
//! - **Lazy series iteration**: the document is parsed once; each series
//!   record is extracted only when the iterator is advanced.
//!
//! - **Typed, validated records**: required attributes fail loudly; optional
//!   attributes stay explicitly absent instead of defaulting silently; unit
//!   attributes fall back to the schema-defined default units.
//!
//! - **Namespace-aware lookup**: the document's `ome` namespace is resolved
//!   from the root element, and the structured-annotation (`sa`) namespace is
//!   derived from it by the schema family's naming convention.
//!
//! - **Key-value projection**: every record converts on demand to a nested
//!   `field name → value` map via [`convert::to_map`], with channel and
//!   plane sequences preserved in source order.
//!
//! ## Quick Start
//!
//! ```
//! let xml = r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2016-06">
//!   <Image ID="Image:0" Name="decon.dv">
//!     <Pixels ID="Pixels:0" DimensionOrder="XYZTC" Type="uint16"
//!             SizeX="960" SizeY="960" SizeZ="1" SizeC="1" SizeT="1">
//!       <Channel ID="Channel:0:0"/>
//!       <Plane TheC="0" TheT="0" TheZ="0" ExposureTime="0.025"/>
//!     </Pixels>
//!   </Image>
//! </OME>"#;
//!
//! for series in ome_meta::read(xml)? {
//!     let series = series?;
//!     println!("{}: {}x{} {}", series.id, series.sizex, series.sizey, series.pixel_type);
//!     let map = ome_meta::convert::series_to_map(&series)?;
//!     assert_eq!(map["channels"].as_array().unwrap().len(), 1);
//! }
//! # Ok::<(), ome_meta::OmeError>(())
//! ```
//!
//! Obtaining the OME-XML string from a proprietary image file (the
//! Bio-Formats role) is out of scope; callers hand this crate the document
//! text.

pub mod coerce;
pub mod convert;
pub mod dom;
pub mod error;
pub mod extract;
pub mod models;
pub mod reader;

pub use error::OmeError;
pub use models::{ChannelMetadata, PlaneMetadata, SeriesMetadata};
pub use reader::{read, OmeXmlReader};
