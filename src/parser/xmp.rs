//! XMP gimbal parsing helper module
//!
//! DJI cameras write the gimbal attitude into an XMP packet stored in a JPEG
//! APP1 segment. The values live on `rdf:Description` elements in the
//! `drone-dji` namespace, normally as attributes but occasionally as child
//! elements, and both forms are accepted here.

use crate::conversion::parse_xmp_number;
use crate::error::{MissionError, Result};
use crate::parser::stream::JpegSegmentStream;
use crate::types::GimbalAttitude;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const DJI_NS: &str = "http://www.dji.com/drone-dji/1.0/";

const XMP_START: &[u8] = b"<x:xmpmeta";
const XMP_END: &[u8] = b"</x:xmpmeta>";

/// Find the XMP packet in a JPEG file and return it as text
///
/// The packet is the `<x:xmpmeta>...</x:xmpmeta>` range of the first APP1
/// segment that contains one. Returns `Ok(None)` when the file has no XMP.
pub fn extract_xmp_packet(jpeg: &[u8]) -> Result<Option<String>> {
    let segments = JpegSegmentStream::new(jpeg)?.app1_segments()?;

    for payload in segments {
        let Some(start) = find(payload, XMP_START) else {
            continue;
        };
        let end = match find(&payload[start..], XMP_END) {
            Some(offset) => start + offset + XMP_END.len(),
            None => {
                return Err(MissionError::Malformed(
                    "XMP packet has no closing x:xmpmeta tag".into(),
                ))
            }
        };
        let text = std::str::from_utf8(&payload[start..end])?;
        return Ok(Some(text.to_string()));
    }

    Ok(None)
}

/// Parse the gimbal attitude out of an XMP packet
pub fn parse_gimbal(xmp: &str) -> Result<GimbalAttitude> {
    let doc = roxmltree::Document::parse(xmp)?;

    let mut pitch = None;
    let mut yaw = None;
    let mut flight_yaw = None;
    let mut relative_altitude = None;

    let descriptions = doc
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name((RDF_NS, "Description")));

    for description in descriptions {
        if pitch.is_none() {
            pitch = dji_value(&description, "GimbalPitchDegree")?;
        }
        if yaw.is_none() {
            yaw = dji_value(&description, "GimbalYawDegree")?;
        }
        if flight_yaw.is_none() {
            flight_yaw = dji_value(&description, "FlightYawDegree")?;
        }
        if relative_altitude.is_none() {
            relative_altitude = dji_value(&description, "RelativeAltitude")?;
        }
    }

    let pitch = pitch.ok_or(MissionError::MissingGimbal)?;

    Ok(GimbalAttitude {
        pitch,
        yaw: yaw.or(flight_yaw),
        relative_altitude,
    })
}

/// Look up a `drone-dji` value as an attribute or a child element
fn dji_value(description: &roxmltree::Node, name: &str) -> Result<Option<f64>> {
    let text = description.attribute((DJI_NS, name)).or_else(|| {
        description
            .children()
            .find(|c| c.is_element() && c.has_tag_name((DJI_NS, name)))
            .and_then(|c| c.text())
    });

    match text {
        Some(text) => match parse_xmp_number(text) {
            Some(value) => Ok(Some(value)),
            None => Err(MissionError::Malformed(format!(
                "drone-dji:{} is not a number: '{}'",
                name, text
            ))),
        },
        None => Ok(None),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
