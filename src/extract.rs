//! Attribute-to-record extraction for series, channel, and plane elements
//!
//! Three pure mapping functions, one per OME element kind. Required
//! attributes (schema-guaranteed) fail loudly; optional numeric and boolean
//! attributes go through [`crate::coerce`] and stay `None` when absent;
//! optional unit and color attributes fall back to the schema-defined
//! defaults below. Every default literal appears exactly once so the policy
//! can be audited against the schema in one place.

use crate::coerce;
use crate::dom::{Element, Namespaces};
use crate::error::OmeError;
use crate::models::{ChannelMetadata, PlaneMetadata, SeriesMetadata};

// Schema-defined attribute defaults.
const SPATIAL_UNIT: &str = "µm";
const WAVELENGTH_UNIT: &str = "nm";
const TIME_UNIT: &str = "s";
const STAGE_UNIT: &str = "reference frame";
const COLOR_SENTINEL: &str = "-1";

/// Map one `Image` element (and its required `Pixels` child) to a
/// [`SeriesMetadata`] record, extracting nested channel and plane records in
/// document order.
pub fn extract_series(element: &Element, ns: &Namespaces) -> Result<SeriesMetadata, OmeError> {
    let pixels = element
        .find("ome:Pixels", ns)
        .ok_or_else(|| OmeError::MissingElement(format!("Pixels in {}", local_tag(element))))?;

    let channels = pixels
        .find_all("ome:Channel", ns)
        .into_iter()
        .map(extract_channel)
        .collect::<Result<Vec<_>, _>>()?;
    let planes = pixels
        .find_all("ome:Plane", ns)
        .into_iter()
        .map(extract_plane)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeriesMetadata {
        id: require_attr(element, "ID")?.to_string(),
        name: attr_owned(element, "Name"),
        pixel_id: require_attr(pixels, "ID")?.to_string(),
        dimension_order: require_attr(pixels, "DimensionOrder")?.to_string(),
        pixel_type: require_attr(pixels, "Type")?.to_string(),
        significant_bits: coerce::integer(pixels.get("SignificantBits"))?,
        interleaved: coerce::boolean(pixels.get("Interleaved")),
        big_endian: coerce::boolean(pixels.get("BigEndian")),
        sizex: require_int(pixels, "SizeX")?,
        sizey: require_int(pixels, "SizeY")?,
        sizez: require_int(pixels, "SizeZ")?,
        sizec: require_int(pixels, "SizeC")?,
        sizet: require_int(pixels, "SizeT")?,
        voxel_size_x: coerce::float(pixels.get("PhysicalSizeX"))?,
        voxel_unit_x: attr_or(pixels, "PhysicalSizeXUnit", SPATIAL_UNIT),
        voxel_size_y: coerce::float(pixels.get("PhysicalSizeY"))?,
        voxel_unit_y: attr_or(pixels, "PhysicalSizeYUnit", SPATIAL_UNIT),
        voxel_size_z: coerce::float(pixels.get("PhysicalSizeZ"))?,
        voxel_unit_z: attr_or(pixels, "PhysicalSizeZUnit", SPATIAL_UNIT),
        time_increment: coerce::float(pixels.get("TimeIncrement"))?,
        time_unit: attr_or(pixels, "TimeIncrementUnit", TIME_UNIT),
        channels,
        planes,
    })
}

/// Map one `Channel` element to a [`ChannelMetadata`] record.
pub fn extract_channel(element: &Element) -> Result<ChannelMetadata, OmeError> {
    Ok(ChannelMetadata {
        id: require_attr(element, "ID")?.to_string(),
        name: attr_owned(element, "Name"),
        samples_per_pixel: coerce::integer(element.get("SamplesPerPixel"))?,
        illumination_type: attr_owned(element, "IlluminationType"),
        pinhole_size: coerce::float(element.get("PinholeSize"))?,
        pinhole_size_unit: attr_or(element, "PinholeSizeUnit", SPATIAL_UNIT),
        acquisition_mode: attr_owned(element, "AcquisitionMode"),
        contrast_method: attr_owned(element, "ContrastMethod"),
        excitation_wavelength: coerce::float(element.get("ExcitationWavelength"))?,
        excitation_unit: attr_or(element, "ExcitationWavelengthUnit", WAVELENGTH_UNIT),
        emission_wavelength: coerce::float(element.get("EmissionWavelength"))?,
        emission_unit: attr_or(element, "EmissionWavelengthUnit", WAVELENGTH_UNIT),
        fluor: attr_owned(element, "Fluor"),
        nd_filter: coerce::float(element.get("NDFilter"))?,
        // Attribute name as spelled in the schema read by the original
        // extractor, record field kept as pockel_cell.
        pockel_cell: coerce::integer(element.get("PocketCellSetting"))?,
        color: attr_or(element, "Color", COLOR_SENTINEL),
    })
}

/// Map one `Plane` element to a [`PlaneMetadata`] record. The three grid
/// indices are schema-required and coerced directly.
pub fn extract_plane(element: &Element) -> Result<PlaneMetadata, OmeError> {
    Ok(PlaneMetadata {
        c: require_int(element, "TheC")?,
        t: require_int(element, "TheT")?,
        z: require_int(element, "TheZ")?,
        time_interval: coerce::float(element.get("DeltaT"))?,
        time_unit: attr_or(element, "DeltaTUnit", TIME_UNIT),
        exposure_time: coerce::float(element.get("ExposureTime"))?,
        exposure_time_unit: attr_or(element, "ExposureTimeUnit", TIME_UNIT),
        stage_x: coerce::float(element.get("PositionX"))?,
        stage_x_unit: attr_or(element, "PositionXUnit", STAGE_UNIT),
        stage_y: coerce::float(element.get("PositionY"))?,
        stage_y_unit: attr_or(element, "PositionYUnit", STAGE_UNIT),
        stage_z: coerce::float(element.get("PositionZ"))?,
        stage_z_unit: attr_or(element, "PositionZUnit", STAGE_UNIT),
    })
}

fn require_attr<'a>(element: &'a Element, name: &str) -> Result<&'a str, OmeError> {
    element.get(name).ok_or_else(|| {
        OmeError::MissingAttribute(format!("{name} on {}", local_tag(element)))
    })
}

fn require_int(element: &Element, name: &str) -> Result<i64, OmeError> {
    let raw = require_attr(element, name)?;
    // coerce::integer(Some(_)) yields Some on success
    Ok(coerce::integer(Some(raw))?.unwrap_or_default())
}

fn attr_owned(element: &Element, name: &str) -> Option<String> {
    element.get(name).map(str::to_string)
}

fn attr_or(element: &Element, name: &str, default: &str) -> String {
    element.get(name).unwrap_or(default).to_string()
}

fn local_tag(element: &Element) -> &str {
    element
        .tag
        .rsplit_once('}')
        .map(|(_, local)| local)
        .unwrap_or(&element.tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    const OME_NS: &str = "http://www.openmicroscopy.org/Schemas/OME/2016-06";

    fn image_fixture(pixels_attrs: &str, body: &str) -> (Element, Namespaces) {
        let xml = format!(
            r#"<OME xmlns="{OME_NS}">
                 <Image ID="Image:0" Name="decon.dv">
                   <Pixels ID="Pixels:0" DimensionOrder="XYZTC" Type="uint16"
                           SizeX="960" SizeY="960" SizeZ="1" SizeC="1" SizeT="1"
                           {pixels_attrs}>{body}</Pixels>
                 </Image>
               </OME>"#
        );
        let root = dom::parse(&xml).unwrap();
        let ns = dom::resolve_namespaces(&root);
        let image = root.find("ome:Image", &ns).unwrap().clone();
        (image, ns)
    }

    #[test]
    fn series_required_fields_and_sizes() {
        let (image, ns) = image_fixture("", "");
        let series = extract_series(&image, &ns).unwrap();

        assert_eq!(series.id, "Image:0");
        assert_eq!(series.name.as_deref(), Some("decon.dv"));
        assert_eq!(series.pixel_id, "Pixels:0");
        assert_eq!(series.dimension_order, "XYZTC");
        assert_eq!(series.pixel_type, "uint16");
        assert_eq!(
            (series.sizex, series.sizey, series.sizez, series.sizec, series.sizet),
            (960, 960, 1, 1, 1)
        );
        assert!(series.channels.is_empty());
        assert!(series.planes.is_empty());
    }

    #[test]
    fn series_optional_fields_default_or_stay_absent() {
        let (image, ns) = image_fixture("", "");
        let series = extract_series(&image, &ns).unwrap();

        assert_eq!(series.significant_bits, None);
        assert_eq!(series.interleaved, None);
        assert_eq!(series.big_endian, None);
        assert_eq!(series.voxel_size_x, None);
        assert_eq!(series.voxel_unit_x, "µm");
        assert_eq!(series.voxel_unit_y, "µm");
        assert_eq!(series.voxel_unit_z, "µm");
        assert_eq!(series.time_increment, None);
        assert_eq!(series.time_unit, "s");
    }

    #[test]
    fn series_explicit_units_override_defaults() {
        let (image, ns) = image_fixture(
            r#"PhysicalSizeX="0.0645" PhysicalSizeXUnit="nm" SignificantBits="12"
               Interleaved="true" BigEndian="false""#,
            "",
        );
        let series = extract_series(&image, &ns).unwrap();

        assert_eq!(series.voxel_size_x, Some(0.0645));
        assert_eq!(series.voxel_unit_x, "nm");
        assert_eq!(series.significant_bits, Some(12));
        assert_eq!(series.interleaved, Some(true));
        assert_eq!(series.big_endian, Some(false));
    }

    #[test]
    fn missing_sizex_is_a_schema_violation() {
        let xml = format!(
            r#"<OME xmlns="{OME_NS}">
                 <Image ID="Image:0">
                   <Pixels ID="Pixels:0" DimensionOrder="XYZTC" Type="uint16"
                           SizeY="960" SizeZ="1" SizeC="1" SizeT="1"/>
                 </Image>
               </OME>"#
        );
        let root = dom::parse(&xml).unwrap();
        let ns = dom::resolve_namespaces(&root);
        let image = root.find("ome:Image", &ns).unwrap();

        let err = extract_series(image, &ns).unwrap_err();
        assert!(matches!(err, OmeError::MissingAttribute(msg) if msg.contains("SizeX")));
    }

    #[test]
    fn missing_pixels_child_is_a_schema_violation() {
        let xml = format!(r#"<OME xmlns="{OME_NS}"><Image ID="Image:0"/></OME>"#);
        let root = dom::parse(&xml).unwrap();
        let ns = dom::resolve_namespaces(&root);
        let image = root.find("ome:Image", &ns).unwrap();

        assert!(matches!(
            extract_series(image, &ns),
            Err(OmeError::MissingElement(_))
        ));
    }

    #[test]
    fn channel_defaults() {
        let (image, ns) = image_fixture("", r#"<Channel ID="Channel:0:0"/>"#);
        let series = extract_series(&image, &ns).unwrap();
        let channel = &series.channels[0];

        assert_eq!(channel.id, "Channel:0:0");
        assert_eq!(channel.name, None);
        assert_eq!(channel.pinhole_size_unit, "µm");
        assert_eq!(channel.excitation_unit, "nm");
        assert_eq!(channel.emission_unit, "nm");
        assert_eq!(channel.color, "-1");
        assert_eq!(channel.samples_per_pixel, None);
        assert_eq!(channel.pockel_cell, None);
    }

    #[test]
    fn channel_explicit_values() {
        let (image, ns) = image_fixture(
            "",
            r#"<Channel ID="Channel:0:0" Name="DAPI" SamplesPerPixel="1"
                        IlluminationType="Epifluorescence" PinholeSize="100.5"
                        AcquisitionMode="WideField" ContrastMethod="Fluorescence"
                        ExcitationWavelength="360.0" EmissionWavelength="457.0"
                        EmissionWavelengthUnit="µm" Fluor="DAPI" NDFilter="0.5"
                        PocketCellSetting="2" Color="-16711681"/>"#,
        );
        let series = extract_series(&image, &ns).unwrap();
        let channel = &series.channels[0];

        assert_eq!(channel.name.as_deref(), Some("DAPI"));
        assert_eq!(channel.samples_per_pixel, Some(1));
        assert_eq!(channel.illumination_type.as_deref(), Some("Epifluorescence"));
        assert_eq!(channel.pinhole_size, Some(100.5));
        assert_eq!(channel.acquisition_mode.as_deref(), Some("WideField"));
        assert_eq!(channel.contrast_method.as_deref(), Some("Fluorescence"));
        assert_eq!(channel.excitation_wavelength, Some(360.0));
        assert_eq!(channel.emission_wavelength, Some(457.0));
        assert_eq!(channel.emission_unit, "µm");
        assert_eq!(channel.fluor.as_deref(), Some("DAPI"));
        assert_eq!(channel.nd_filter, Some(0.5));
        assert_eq!(channel.pockel_cell, Some(2));
        assert_eq!(channel.color, "-16711681");
    }

    #[test]
    fn plane_indices_required_and_defaults_applied() {
        let (image, ns) = image_fixture(
            "",
            r#"<Plane TheC="0" TheT="3" TheZ="7" ExposureTime="0.025"
                      PositionX="337.765" PositionY="-200.1"/>"#,
        );
        let series = extract_series(&image, &ns).unwrap();
        let plane = &series.planes[0];

        assert_eq!((plane.c, plane.t, plane.z), (0, 3, 7));
        assert_eq!(plane.time_interval, None);
        assert_eq!(plane.time_unit, "s");
        assert_eq!(plane.exposure_time, Some(0.025));
        assert_eq!(plane.exposure_time_unit, "s");
        assert_eq!(plane.stage_x, Some(337.765));
        assert_eq!(plane.stage_x_unit, "reference frame");
        assert_eq!(plane.stage_y, Some(-200.1));
        assert_eq!(plane.stage_z, None);
        assert_eq!(plane.stage_z_unit, "reference frame");
    }

    #[test]
    fn plane_missing_index_is_a_schema_violation() {
        let (image, ns) = image_fixture("", r#"<Plane TheC="0" TheT="0"/>"#);
        let err = extract_series(&image, &ns).unwrap_err();
        assert!(matches!(err, OmeError::MissingAttribute(msg) if msg.contains("TheZ")));
    }

    #[test]
    fn channels_and_planes_keep_document_order() {
        let (image, ns) = image_fixture(
            "",
            r#"<Channel ID="Channel:0:0"/>
               <Channel ID="Channel:0:1"/>
               <Plane TheC="0" TheT="0" TheZ="0"/>
               <Plane TheC="1" TheT="0" TheZ="0"/>
               <Plane TheC="0" TheT="0" TheZ="1"/>"#,
        );
        let series = extract_series(&image, &ns).unwrap();

        let ids: Vec<&str> = series.channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["Channel:0:0", "Channel:0:1"]);
        let grid: Vec<(i64, i64, i64)> =
            series.planes.iter().map(|p| (p.c, p.t, p.z)).collect();
        assert_eq!(grid, [(0, 0, 0), (1, 0, 0), (0, 0, 1)]);
    }
}
