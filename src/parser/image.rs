//! Per-image metadata extraction
//!
//! Reads a JPEG once and combines the EXIF GPS fix with the XMP gimbal
//! attitude into an [`ImageRecord`].

use crate::error::{MissionError, Result};
use crate::filters::classify;
use crate::parser::exif_gps::read_gps;
use crate::parser::xmp::{extract_xmp_packet, parse_gimbal};
use crate::types::{GimbalAttitude, ImageRecord};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read and classify one image
///
/// GPS is required; the gimbal attitude is optional and an image without
/// it is classified as [`crate::ImageKind::Unknown`].
pub fn read_image_metadata(path: &Path, nadir_limit: f64) -> Result<ImageRecord> {
    let data = fs::read(path)?;
    parse_image_bytes(path, &data, nadir_limit)
}

/// Same as [`read_image_metadata`] for a file already in memory
pub fn parse_image_bytes(path: &Path, data: &[u8], nadir_limit: f64) -> Result<ImageRecord> {
    let gps = read_gps(data)?;
    debug!(
        image = %path.display(),
        latitude = gps.latitude,
        longitude = gps.longitude,
        altitude = gps.altitude,
        "GPS fix"
    );

    let gimbal = read_gimbal(path, data);
    let kind = classify(gimbal.map(|g| g.pitch), nadir_limit);

    Ok(ImageRecord {
        path: path.to_path_buf(),
        gps,
        gimbal,
        kind,
    })
}

/// Gimbal attitude, or `None` with a log line when it can't be read
fn read_gimbal(path: &Path, data: &[u8]) -> Option<GimbalAttitude> {
    let packet = match extract_xmp_packet(data) {
        Ok(Some(packet)) => packet,
        Ok(None) => {
            debug!(image = %path.display(), "no XMP packet");
            return None;
        }
        Err(e) => {
            warn!(image = %path.display(), "unreadable XMP packet: {}", e);
            return None;
        }
    };

    debug!(image = %path.display(), "XMP packet:\n{}", packet);

    match parse_gimbal(&packet) {
        Ok(gimbal) => Some(gimbal),
        Err(MissionError::MissingGimbal) => {
            debug!(image = %path.display(), "XMP packet has no gimbal pitch");
            None
        }
        Err(e) => {
            warn!(image = %path.display(), "ignoring gimbal data: {}", e);
            None
        }
    }
}
