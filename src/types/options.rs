use crate::filters::AltitudeRange;
use crate::scan::is_glob_pattern;
use std::path::PathBuf;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gimbal pitch below which an image counts as nadir
pub const DEFAULT_NADIR_LIMIT: f64 = -88.0;

/// Which image classes to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KindFilter {
    Nadir,
    Oblique,
    #[default]
    Any,
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" | "NADIR" => Ok(KindFilter::Nadir),
            "O" | "OBLIQUE" => Ok(KindFilter::Oblique),
            "A" | "ANY" => Ok(KindFilter::Any),
            other => Err(format!(
                "unknown image type '{}' (expected N, O or A)",
                other
            )),
        }
    }
}

/// Where the altitude compared against the altitude range comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AltitudeSource {
    /// EXIF GPSAltitude (above sea level)
    #[default]
    Gps,
    /// XMP RelativeAltitude (above the take-off point)
    Relative,
}

impl FromStr for AltitudeSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gps" => Ok(AltitudeSource::Gps),
            "relative" => Ok(AltitudeSource::Relative),
            other => Err(format!(
                "unknown altitude source '{}' (expected gps or relative)",
                other
            )),
        }
    }
}

/// Options controlling a survey run and its outputs
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyOptions {
    /// Folders, files or glob patterns to scan
    pub inputs: Vec<String>,
    /// Output folder; the first input is used when unset
    pub output_dir: Option<PathBuf>,
    pub kind_filter: KindFilter,
    pub altitude: AltitudeRange,
    pub altitude_source: AltitudeSource,
    pub nadir_limit: f64,
    /// Write the per-image inspection report
    pub info: bool,
    pub debug: bool,
    /// Also write a GeoJSON overlay (requires the `json` feature)
    pub geojson: bool,
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            kind_filter: KindFilter::Any,
            altitude: AltitudeRange::default(),
            altitude_source: AltitudeSource::Gps,
            nadir_limit: DEFAULT_NADIR_LIMIT,
            info: false,
            debug: false,
            geojson: false,
        }
    }
}

impl SurveyOptions {
    /// Folder the overlays are written to
    ///
    /// Falls back to the first input folder, the parent of a single input
    /// file, or the current directory for glob patterns.
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        match self.inputs.first() {
            Some(input) if is_glob_pattern(input) => PathBuf::from("."),
            Some(input) => {
                let path = PathBuf::from(input);
                if path.is_file() {
                    path.parent()
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| PathBuf::from("."))
                } else {
                    path
                }
            }
            None => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_filter_parsing() {
        assert_eq!("N".parse::<KindFilter>(), Ok(KindFilter::Nadir));
        assert_eq!("o".parse::<KindFilter>(), Ok(KindFilter::Oblique));
        assert_eq!("A".parse::<KindFilter>(), Ok(KindFilter::Any));
        assert!("X".parse::<KindFilter>().is_err());
    }

    #[test]
    fn test_altitude_source_parsing() {
        assert_eq!("GPS".parse::<AltitudeSource>(), Ok(AltitudeSource::Gps));
        assert_eq!(
            "relative".parse::<AltitudeSource>(),
            Ok(AltitudeSource::Relative)
        );
        assert!("baro".parse::<AltitudeSource>().is_err());
    }

    #[test]
    fn test_defaults() {
        let options = SurveyOptions::default();
        assert_eq!(options.kind_filter, KindFilter::Any);
        assert_eq!(options.nadir_limit, -88.0);
        assert_eq!(options.altitude.min(), 0.0);
        assert_eq!(options.altitude.max(), 10000.0);
        assert!(!options.info);
    }

    #[test]
    fn test_output_dir_defaults_to_input() {
        let mut options = SurveyOptions {
            inputs: vec!["/mnt/sd/DCIM".to_string()],
            ..SurveyOptions::default()
        };
        assert_eq!(options.resolved_output_dir(), PathBuf::from("/mnt/sd/DCIM"));

        options.output_dir = Some(PathBuf::from("/tmp/out"));
        assert_eq!(options.resolved_output_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_output_dir_for_glob_input() {
        let options = SurveyOptions {
            inputs: vec!["/mnt/sd/DCIM/*MEDIA".to_string()],
            ..SurveyOptions::default()
        };
        assert_eq!(options.resolved_output_dir(), PathBuf::from("."));
    }
}
