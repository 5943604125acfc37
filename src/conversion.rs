//! Unit conversion utilities for drone image metadata
//!
//! Contains the coordinate and angle arithmetic shared by the EXIF and XMP
//! readers: sexagesimal to decimal degrees, hemisphere signs, yaw wrapping
//! and DJI's signed number formatting.

/// Convert degrees/minutes/seconds to decimal degrees
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Apply the EXIF hemisphere reference to an unsigned coordinate
///
/// `S` and `W` give a negative value regardless of the input sign, anything
/// else (`N`, `E`, blank) leaves the value untouched.
pub fn apply_hemisphere(degrees: f64, reference: &str) -> f64 {
    match reference.trim().to_ascii_uppercase().as_str() {
        "S" | "W" => -degrees.abs(),
        _ => degrees,
    }
}

/// Wrap a yaw angle into [0, 360)
pub fn normalize_yaw(yaw: f64) -> f64 {
    let wrapped = yaw.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Parse a number as DJI writes it in XMP (`+35.20`, `-90.00`, ` 1.5 `)
pub fn parse_xmp_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    unsigned.parse::<f64>().ok().filter(|v| v.is_finite())
}
