//! Metadata record types for OME-XML image series
//!
//! These are immutable value records, fully constructed from one XML
//! element's attributes. Optional fields are `Option<_>`: `None` means the
//! source attribute was absent, never a silently substituted default. Unit
//! strings are the exception — the OME schema defines a default unit per
//! quantity, and that default is filled in at extraction time.

use serde::Serialize;

/// Metadata for one image series (one `Image` element and its `Pixels`
/// block).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMetadata {
    /// Image identifier, e.g. `"Image:0"`
    pub id: String,

    /// Display name of the series
    pub name: Option<String>,

    /// Identifier of the `Pixels` block, e.g. `"Pixels:0"`
    pub pixel_id: String,

    /// Axis ordering of the pixel data, e.g. `"XYZCT"`
    pub dimension_order: String,

    /// Pixel encoding tag, e.g. `"uint16"`
    pub pixel_type: String,

    /// Number of significant bits per sample
    pub significant_bits: Option<i64>,

    /// Whether channel samples are interleaved
    pub interleaved: Option<bool>,

    /// Whether multi-byte samples are stored big-endian
    pub big_endian: Option<bool>,

    /// Extent along the X axis in pixels
    pub sizex: i64,

    /// Extent along the Y axis in pixels
    pub sizey: i64,

    /// Number of Z sections
    pub sizez: i64,

    /// Number of channels
    pub sizec: i64,

    /// Number of timepoints
    pub sizet: i64,

    /// Physical voxel extent along X
    pub voxel_size_x: Option<f64>,

    /// Unit of `voxel_size_x` (schema default `"µm"`)
    pub voxel_unit_x: String,

    /// Physical voxel extent along Y
    pub voxel_size_y: Option<f64>,

    /// Unit of `voxel_size_y` (schema default `"µm"`)
    pub voxel_unit_y: String,

    /// Physical voxel extent along Z
    pub voxel_size_z: Option<f64>,

    /// Unit of `voxel_size_z` (schema default `"µm"`)
    pub voxel_unit_z: String,

    /// Time between consecutive timepoints
    pub time_increment: Option<f64>,

    /// Unit of `time_increment` (schema default `"s"`)
    pub time_unit: String,

    /// Channel records, in document order (channel index order)
    pub channels: Vec<ChannelMetadata>,

    /// Plane records, in document order
    pub planes: Vec<PlaneMetadata>,
}

/// Metadata for one acquisition channel within a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMetadata {
    /// Channel identifier, e.g. `"Channel:0:0"`
    pub id: String,

    /// Channel name
    pub name: Option<String>,

    /// Samples per pixel for this channel
    pub samples_per_pixel: Option<i64>,

    /// Illumination type tag, e.g. `"Epifluorescence"`
    pub illumination_type: Option<String>,

    /// Pinhole diameter
    pub pinhole_size: Option<f64>,

    /// Unit of `pinhole_size` (schema default `"µm"`)
    pub pinhole_size_unit: String,

    /// Acquisition mode tag, e.g. `"LaserScanningConfocalMicroscopy"`
    pub acquisition_mode: Option<String>,

    /// Contrast method tag, e.g. `"Fluorescence"`
    pub contrast_method: Option<String>,

    /// Excitation wavelength
    pub excitation_wavelength: Option<f64>,

    /// Unit of `excitation_wavelength` (schema default `"nm"`)
    pub excitation_unit: String,

    /// Emission wavelength
    pub emission_wavelength: Option<f64>,

    /// Unit of `emission_wavelength` (schema default `"nm"`)
    pub emission_unit: String,

    /// Fluorophore name
    pub fluor: Option<String>,

    /// Neutral-density filter value
    pub nd_filter: Option<f64>,

    /// Pockels cell setting
    pub pockel_cell: Option<i64>,

    /// Channel color; the schema sentinel `"-1"` (white) when absent
    pub color: String,
}

/// Metadata for one 2D plane within a series' C/T/Z grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneMetadata {
    /// Channel index of this plane
    pub c: i64,

    /// Timepoint index of this plane
    pub t: i64,

    /// Z-section index of this plane
    pub z: i64,

    /// Time elapsed since the start of the acquisition
    pub time_interval: Option<f64>,

    /// Unit of `time_interval` (schema default `"s"`)
    pub time_unit: String,

    /// Exposure time for this plane
    pub exposure_time: Option<f64>,

    /// Unit of `exposure_time` (schema default `"s"`)
    pub exposure_time_unit: String,

    /// Stage position along X
    pub stage_x: Option<f64>,

    /// Unit of `stage_x` (schema default `"reference frame"`)
    pub stage_x_unit: String,

    /// Stage position along Y
    pub stage_y: Option<f64>,

    /// Unit of `stage_y` (schema default `"reference frame"`)
    pub stage_y_unit: String,

    /// Stage position along Z
    pub stage_z: Option<f64>,

    /// Unit of `stage_z` (schema default `"reference frame"`)
    pub stage_z_unit: String,
}
