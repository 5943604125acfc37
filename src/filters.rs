//! Image classification and filtering
//!
//! Decides whether an image is nadir or oblique from its gimbal pitch and
//! whether it belongs in the overlays given the requested image type and
//! altitude window.
//!
//! # Usage
//!
//! The CLI maps `-t` and `-a` onto [`SurveyOptions`]; library consumers can
//! call [`should_skip_image`] directly on records they built themselves.

use crate::types::{AltitudeSource, ImageKind, ImageRecord, KindFilter, SurveyOptions};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_MIN_ALTITUDE: f64 = 0.0;
const DEFAULT_MAX_ALTITUDE: f64 = 10_000.0;

/// Open altitude interval in metres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltitudeRange {
    min: f64,
    max: f64,
}

impl AltitudeRange {
    /// Build a range, swapping the bounds if they were given in reverse
    pub fn new(min: f64, max: f64) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Strict containment: both bounds are excluded
    pub fn contains(&self, altitude: f64) -> bool {
        self.min < altitude && altitude < self.max
    }
}

impl Default for AltitudeRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ALTITUDE, DEFAULT_MAX_ALTITUDE)
    }
}

/// Classify a gimbal pitch; pitch strictly below `nadir_limit` is nadir
pub fn classify(pitch: Option<f64>, nadir_limit: f64) -> ImageKind {
    match pitch {
        Some(p) if p < nadir_limit => ImageKind::Nadir,
        Some(_) => ImageKind::Oblique,
        None => ImageKind::Unknown,
    }
}

/// Check an image class against the requested type
pub fn kind_matches(kind: ImageKind, filter: KindFilter) -> bool {
    match filter {
        KindFilter::Any => true,
        KindFilter::Nadir => kind == ImageKind::Nadir,
        KindFilter::Oblique => kind == ImageKind::Oblique,
    }
}

/// Altitude used for range filtering, per the configured source
pub fn filter_altitude(record: &ImageRecord, source: AltitudeSource) -> Option<f64> {
    match source {
        AltitudeSource::Gps => Some(record.gps.altitude),
        AltitudeSource::Relative => record.relative_altitude(),
    }
}

/// Determines if an image should be left out of the overlays
///
/// The type filter is applied first, then the altitude window. Images without
/// gimbal data are only kept when any type is requested.
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_image(record: &ImageRecord, options: &SurveyOptions) -> (bool, String) {
    if !kind_matches(record.kind, options.kind_filter) {
        return (
            true,
            format!("{} image excluded by type filter", record.kind),
        );
    }

    let altitude = match filter_altitude(record, options.altitude_source) {
        Some(altitude) => altitude,
        None => return (true, "no relative altitude in XMP".to_string()),
    };

    if !options.altitude.contains(altitude) {
        return (
            true,
            format!(
                "altitude {:.1}m outside ({:.1}, {:.1})",
                altitude,
                options.altitude.min(),
                options.altitude.max()
            ),
        );
    }

    (false, String::new())
}
