//! Mission Assistant Library
//!
//! Inspects drone survey images on site: reads the EXIF GPS position and the
//! DJI XMP gimbal attitude of every JPEG in a folder tree, classifies each
//! shot as nadir or oblique, filters by type and altitude, and writes KML
//! overlays of the image positions and the surveyed site boundary.
//!
//! # Features
//!
//! - **`csv`** (default): Enable the per-image CSV inspection report
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable GeoJSON overlay export
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Read a single image:
//! ```rust,no_run
//! use mission_assistant::{read_image_metadata, DEFAULT_NADIR_LIMIT};
//! use std::path::Path;
//!
//! let record = read_image_metadata(Path::new("DJI_0001.JPG"), DEFAULT_NADIR_LIMIT).unwrap();
//! println!("{} at {:.6}, {:.6}", record.kind, record.gps.latitude, record.gps.longitude);
//! ```
//!
//! Survey a folder and write the overlays:
//! ```rust,no_run
//! use mission_assistant::{run_survey, write_outputs, KindFilter, SurveyOptions};
//!
//! let options = SurveyOptions {
//!     inputs: vec!["/media/sd/DCIM".to_string()],
//!     kind_filter: KindFilter::Nadir,
//!     ..SurveyOptions::default()
//! };
//! let report = run_survey(&options).unwrap();
//! let written = write_outputs(&report, &options).unwrap();
//! if let Some(path) = written.points_kml {
//!     println!("Placemarks in: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Pipeline
//! - [`run_survey`] - Scan, read, classify and filter a set of inputs
//! - [`write_outputs`] - Write every enabled overlay for a report
//! - [`collect_images`] - Expand folders and globs into JPEG paths
//!
//! ## Metadata
//! - [`read_image_metadata`] - GPS + gimbal record for one file
//! - [`read_gps`] - EXIF GPS position
//! - [`extract_xmp_packet`] / [`parse_gimbal`] - DJI gimbal attitude
//!
//! ## Classification
//! - [`classify`] - Nadir/oblique decision from gimbal pitch
//! - [`should_skip_image`] - Type and altitude filtering
//! - [`Heading::from_yaw`] - Eight-way compass sector of a yaw angle
//!
//! ## Export
//! - [`export_points_kml`] - Directional placemarks
//! - [`export_boundary_kml`] - Convex-hull site boundary
//! - [`site_boundary`] - Hull computation

pub mod boundary;
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod scan;
pub mod survey;
pub mod types;

#[allow(ambiguous_glob_reexports)]
pub use boundary::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use scan::*;
#[allow(ambiguous_glob_reexports)]
pub use survey::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
