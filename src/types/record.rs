use crate::types::{GimbalAttitude, GpsFix, Heading};
use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Camera orientation class of a survey image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImageKind {
    /// Camera pointing straight down
    Nadir,
    /// Camera angled away from vertical
    Oblique,
    /// No gimbal pitch available
    Unknown,
}

impl ImageKind {
    /// One-letter code used in the inspection report
    pub fn code(self) -> char {
        match self {
            ImageKind::Nadir => 'N',
            ImageKind::Oblique => 'O',
            ImageKind::Unknown => 'U',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Nadir => "nadir",
            ImageKind::Oblique => "oblique",
            ImageKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of one image that made it through extraction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageRecord {
    pub path: PathBuf,
    pub gps: GpsFix,
    pub gimbal: Option<GimbalAttitude>,
    pub kind: ImageKind,
}

impl ImageRecord {
    pub fn file_name(&self) -> &str {
        file_name_of(&self.path)
    }

    pub fn pitch(&self) -> Option<f64> {
        self.gimbal.map(|g| g.pitch)
    }

    pub fn yaw(&self) -> Option<f64> {
        self.gimbal.and_then(|g| g.yaw)
    }

    /// Compass sector the camera faces, if yaw is known
    pub fn heading(&self) -> Option<Heading> {
        self.yaw().map(Heading::from_yaw)
    }

    pub fn relative_altitude(&self) -> Option<f64> {
        self.gimbal.and_then(|g| g.relative_altitude)
    }
}

pub(crate) fn file_name_of(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
}
