//! Survey pipeline
//!
//! Ties the stages together: find images, read each one, classify and
//! filter, then approximate the site boundary from what survived.

use crate::boundary::site_boundary;
use crate::error::Result;
use crate::filters::should_skip_image;
use crate::parser::read_image_metadata;
use crate::scan::collect_images;
use crate::types::{ImageRecord, SurveyOptions, SurveyReport};
use std::path::Path;
use tracing::{debug, info, warn};

/// Scan the inputs and build the survey report
///
/// Images that can't be read or lack GPS are logged and skipped; only a
/// failure to enumerate the inputs is an error.
pub fn run_survey(options: &SurveyOptions) -> Result<SurveyReport> {
    let images = collect_images(&options.inputs)?;
    let mut report = SurveyReport::new();
    report.images_found = images.len();

    debug!(
        "Type filter: {:?}, altitude ({}, {}) from {:?}, nadir limit {}",
        options.kind_filter,
        options.altitude.min(),
        options.altitude.max(),
        options.altitude_source,
        options.nadir_limit
    );

    if images.is_empty() {
        return Ok(report);
    }
    info!("Found {} JPEG images", images.len());

    for path in images {
        match inspect_image(&path, options) {
            Ok(record) => report.accepted.push(record),
            Err(reason) => report.skip(path, reason),
        }
    }

    report.boundary = site_boundary(&report.accepted);

    info!(
        "Accepted {} images ({} nadir, {} oblique), skipped {}",
        report.accepted.len(),
        report.nadir_count(),
        report.oblique_count(),
        report.skipped.len()
    );
    Ok(report)
}

/// Read and filter one image, returning the skip reason on rejection
fn inspect_image(path: &Path, options: &SurveyOptions) -> std::result::Result<ImageRecord, String> {
    let record = match read_image_metadata(path, options.nadir_limit) {
        Ok(record) => record,
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            return Err(e.to_string());
        }
    };

    let (skip, reason) = should_skip_image(&record, options);
    if skip {
        debug!("Skipping {}: {}", path.display(), reason);
        return Err(reason);
    }

    info!(
        image = %path.display(),
        kind = %record.kind.code(),
        latitude = record.gps.latitude,
        longitude = record.gps.longitude,
        altitude = record.gps.altitude,
        "accepted"
    );
    Ok(record)
}
