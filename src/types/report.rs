use crate::types::{ImageKind, ImageRecord};
use geo::Polygon;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An image left out of the overlays, with the reason
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedImage {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning one survey
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyReport {
    /// JPEG files found under the inputs
    pub images_found: usize,
    /// Images that passed extraction and filtering, in scan order
    pub accepted: Vec<ImageRecord>,
    pub skipped: Vec<SkippedImage>,
    /// Convex hull of the accepted positions (lon/lat)
    pub boundary: Option<Polygon<f64>>,
}

impl SurveyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the scan found no JPEG at all
    pub fn is_empty(&self) -> bool {
        self.images_found == 0
    }

    pub fn skip(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped.push(SkippedImage {
            path,
            reason: reason.into(),
        });
    }

    pub fn nadir_count(&self) -> usize {
        self.count_kind(ImageKind::Nadir)
    }

    pub fn oblique_count(&self) -> usize {
        self.count_kind(ImageKind::Oblique)
    }

    fn count_kind(&self, kind: ImageKind) -> usize {
        self.accepted.iter().filter(|r| r.kind == kind).count()
    }
}
