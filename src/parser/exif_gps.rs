//! EXIF GPS parsing helper module
//!
//! Reads the GPS IFD of a JPEG with `kamadak-exif` and converts the
//! sexagesimal latitude/longitude triplets and altitude to decimal values.

use crate::conversion::{apply_hemisphere, dms_to_degrees};
use crate::error::{MissionError, Result};
use crate::types::GpsFix;
use exif::{Exif, In, Tag, Value};
use std::io::Cursor;

/// Read the GPS position from an in-memory JPEG
pub fn read_gps(jpeg: &[u8]) -> Result<GpsFix> {
    let exif = exif::Reader::new().read_from_container(&mut Cursor::new(jpeg))?;
    gps_from_exif(&exif)
}

/// Extract the GPS position from an already parsed EXIF block
pub fn gps_from_exif(exif: &Exif) -> Result<GpsFix> {
    let lat_ref = ascii_field(exif, Tag::GPSLatitudeRef)?;
    let latitude = apply_hemisphere(coordinate_field(exif, Tag::GPSLatitude)?, &lat_ref);

    let lon_ref = ascii_field(exif, Tag::GPSLongitudeRef)?;
    let longitude = apply_hemisphere(coordinate_field(exif, Tag::GPSLongitude)?, &lon_ref);

    let altitude = altitude_field(exif)?;

    Ok(GpsFix {
        latitude,
        longitude,
        altitude,
    })
}

fn field<'a>(exif: &'a Exif, tag: Tag) -> Result<&'a exif::Field> {
    exif.get_field(tag, In::PRIMARY)
        .ok_or_else(|| MissionError::MissingGps(tag.to_string()))
}

fn ascii_field(exif: &Exif, tag: Tag) -> Result<String> {
    match &field(exif, tag)?.value {
        Value::Ascii(strings) => Ok(strings
            .first()
            .map(|s| String::from_utf8_lossy(s).trim_matches('\0').trim().to_string())
            .unwrap_or_default()),
        other => Err(MissionError::Malformed(format!(
            "{} has unexpected type {:?}",
            tag, other
        ))),
    }
}

/// Degrees/minutes/seconds triplet to unsigned decimal degrees
fn coordinate_field(exif: &Exif, tag: Tag) -> Result<f64> {
    let parts = rational_parts(&field(exif, tag)?.value, tag)?;
    if parts.len() < 3 {
        return Err(MissionError::Malformed(format!(
            "{} has {} components, expected 3",
            tag,
            parts.len()
        )));
    }
    Ok(dms_to_degrees(parts[0], parts[1], parts[2]))
}

fn altitude_field(exif: &Exif) -> Result<f64> {
    let parts = rational_parts(&field(exif, Tag::GPSAltitude)?.value, Tag::GPSAltitude)?;
    let altitude = *parts
        .first()
        .ok_or_else(|| MissionError::Malformed("GPSAltitude is empty".into()))?;

    // GPSAltitudeRef 1 means below sea level
    let below_sea_level = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        == Some(1);

    Ok(if below_sea_level {
        -altitude.abs()
    } else {
        altitude
    })
}

fn rational_parts(value: &Value, tag: Tag) -> Result<Vec<f64>> {
    let parts: Vec<(f64, bool)> = match value {
        Value::Rational(values) => values
            .iter()
            .map(|r| (r.to_f64(), r.denom == 0))
            .collect(),
        Value::SRational(values) => values
            .iter()
            .map(|r| (r.to_f64(), r.denom == 0))
            .collect(),
        other => {
            return Err(MissionError::Malformed(format!(
                "{} has unexpected type {:?}",
                tag, other
            )))
        }
    };

    if parts.iter().any(|(_, zero_denom)| *zero_denom) {
        return Err(MissionError::Malformed(format!(
            "{} has a zero denominator",
            tag
        )));
    }

    Ok(parts.into_iter().map(|(v, _)| v).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::experimental::Writer;
    use exif::{Field, Rational};

    fn rationals(values: &[(u32, u32)]) -> Value {
        Value::Rational(
            values
                .iter()
                .map(|&(num, denom)| Rational { num, denom })
                .collect(),
        )
    }

    fn ascii(text: &str) -> Value {
        Value::Ascii(vec![text.as_bytes().to_vec()])
    }

    fn gps_fields(lat_ref: &str, lon_ref: &str, alt_ref: u8) -> Vec<Field> {
        vec![
            Field {
                tag: Tag::Make,
                ifd_num: In::PRIMARY,
                value: ascii("DJI"),
            },
            Field {
                tag: Tag::GPSLatitudeRef,
                ifd_num: In::PRIMARY,
                value: ascii(lat_ref),
            },
            Field {
                tag: Tag::GPSLatitude,
                ifd_num: In::PRIMARY,
                value: rationals(&[(40, 1), (42, 1), (4632, 100)]),
            },
            Field {
                tag: Tag::GPSLongitudeRef,
                ifd_num: In::PRIMARY,
                value: ascii(lon_ref),
            },
            Field {
                tag: Tag::GPSLongitude,
                ifd_num: In::PRIMARY,
                value: rationals(&[(74, 1), (0, 1), (2196, 100)]),
            },
            Field {
                tag: Tag::GPSAltitudeRef,
                ifd_num: In::PRIMARY,
                value: Value::Byte(vec![alt_ref]),
            },
            Field {
                tag: Tag::GPSAltitude,
                ifd_num: In::PRIMARY,
                value: rationals(&[(12050, 100)]),
            },
        ]
    }

    fn parse(fields: &[Field]) -> Exif {
        let mut writer = Writer::new();
        for f in fields {
            writer.push_field(f);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        exif::Reader::new().read_raw(buf.into_inner()).unwrap()
    }

    #[test]
    fn test_gps_from_exif_northern_western() {
        let exif = parse(&gps_fields("N", "W", 0));
        let fix = gps_from_exif(&exif).unwrap();
        assert!((fix.latitude - 40.712866666).abs() < 1e-6);
        assert!((fix.longitude + 74.0061).abs() < 1e-6);
        assert!((fix.altitude - 120.5).abs() < 1e-9);
    }

    #[test]
    fn test_gps_from_exif_southern_below_sea_level() {
        let exif = parse(&gps_fields("S", "E", 1));
        let fix = gps_from_exif(&exif).unwrap();
        assert!(fix.latitude < 0.0);
        assert!(fix.longitude > 0.0);
        assert!((fix.altitude + 120.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_latitude() {
        let fields: Vec<Field> = gps_fields("N", "E", 0)
            .into_iter()
            .filter(|f| f.tag != Tag::GPSLatitude)
            .collect();
        let exif = parse(&fields);
        assert!(matches!(
            gps_from_exif(&exif),
            Err(MissionError::MissingGps(_))
        ));
    }

    #[test]
    fn test_short_triplet_is_malformed() {
        let mut fields = gps_fields("N", "E", 0);
        for f in fields.iter_mut() {
            if f.tag == Tag::GPSLongitude {
                f.value = rationals(&[(74, 1), (0, 1)]);
            }
        }
        let exif = parse(&fields);
        assert!(matches!(
            gps_from_exif(&exif),
            Err(MissionError::Malformed(_))
        ));
    }

    #[test]
    fn test_zero_denominator_is_malformed() {
        let value = rationals(&[(74, 0), (0, 1), (0, 1)]);
        assert!(rational_parts(&value, Tag::GPSLongitude).is_err());
    }

    #[test]
    fn test_read_gps_rejects_non_jpeg() {
        assert!(read_gps(b"not an image").is_err());
    }
}
