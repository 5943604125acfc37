//! Synthetic DJI-style JPEGs for integration tests
//!
//! The files carry a real EXIF GPS block and an XMP packet but no image
//! data, which is all the metadata readers look at.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub struct Shot {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
    pub relative_altitude: Option<f64>,
}

impl Shot {
    pub fn nadir(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            pitch: Some(-90.0),
            yaw: Some(0.0),
            relative_altitude: None,
        }
    }

    pub fn oblique(latitude: f64, longitude: f64, altitude: f64, yaw: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            pitch: Some(-45.0),
            yaw: Some(yaw),
            relative_altitude: None,
        }
    }

    pub fn without_xmp(mut self) -> Self {
        self.pitch = None;
        self.yaw = None;
        self
    }
}

fn dms(value: f64) -> Value {
    let abs = value.abs();
    let degrees = abs.floor();
    let minutes = ((abs - degrees) * 60.0).floor();
    let seconds = (abs - degrees - minutes / 60.0) * 3600.0;
    Value::Rational(vec![
        Rational {
            num: degrees as u32,
            denom: 1,
        },
        Rational {
            num: minutes as u32,
            denom: 1,
        },
        Rational {
            num: (seconds * 10_000.0).round() as u32,
            denom: 10_000,
        },
    ])
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn exif_tiff(shot: &Shot) -> Vec<u8> {
    let fields = vec![
        field(Tag::Make, ascii("DJI")),
        field(
            Tag::GPSLatitudeRef,
            ascii(if shot.latitude < 0.0 { "S" } else { "N" }),
        ),
        field(Tag::GPSLatitude, dms(shot.latitude)),
        field(
            Tag::GPSLongitudeRef,
            ascii(if shot.longitude < 0.0 { "W" } else { "E" }),
        ),
        field(Tag::GPSLongitude, dms(shot.longitude)),
        field(
            Tag::GPSAltitudeRef,
            Value::Byte(vec![u8::from(shot.altitude < 0.0)]),
        ),
        field(
            Tag::GPSAltitude,
            Value::Rational(vec![Rational {
                num: (shot.altitude.abs() * 1000.0).round() as u32,
                denom: 1000,
            }]),
        ),
    ];

    let mut writer = Writer::new();
    for f in &fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write EXIF");
    buf.into_inner()
}

pub fn xmp_packet(shot: &Shot) -> Option<String> {
    let pitch = shot.pitch?;
    let mut attrs = format!(r#"drone-dji:GimbalPitchDegree="{:+.2}""#, pitch);
    if let Some(yaw) = shot.yaw {
        attrs.push_str(&format!(r#" drone-dji:GimbalYawDegree="{:+.2}""#, yaw));
    }
    if let Some(rel) = shot.relative_altitude {
        attrs.push_str(&format!(r#" drone-dji:RelativeAltitude="{:+.2}""#, rel));
    }
    Some(format!(
        r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="DJI Meta Data" xmlns:drone-dji="http://www.dji.com/drone-dji/1.0/" {}/>
 </rdf:RDF>
</x:xmpmeta>"#,
        attrs
    ))
}

fn push_segment(out: &mut Vec<u8>, marker: u8, payload: &[u8]) {
    let len = (payload.len() + 2) as u16;
    out.extend_from_slice(&[0xFF, marker, (len >> 8) as u8, len as u8]);
    out.extend_from_slice(payload);
}

/// JPEG bytes with EXIF GPS and, when the shot has gimbal data, XMP
pub fn jpeg_bytes(shot: &Shot) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];

    let mut exif_payload = b"Exif\0\0".to_vec();
    exif_payload.extend(exif_tiff(shot));
    push_segment(&mut out, 0xE1, &exif_payload);

    if let Some(packet) = xmp_packet(shot) {
        let mut xmp_payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
        xmp_payload.extend_from_slice(packet.as_bytes());
        push_segment(&mut out, 0xE1, &xmp_payload);
    }

    // Minimal scan so readers stop at SOS like on a real file
    push_segment(&mut out, 0xDA, &[0x00]);
    out.extend_from_slice(&[0x12, 0x34, 0xFF, 0xD9]);
    out
}

/// JPEG bytes with an XMP packet but no EXIF block
pub fn jpeg_without_gps() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    let shot = Shot::nadir(0.0, 0.0, 0.0);
    let mut xmp_payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    xmp_payload.extend_from_slice(xmp_packet(&shot).unwrap_or_default().as_bytes());
    push_segment(&mut out, 0xE1, &xmp_payload);
    push_segment(&mut out, 0xDA, &[0x00]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn write_shot(path: &Path, shot: &Shot) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, jpeg_bytes(shot)).expect("write JPEG");
}

/// A 100 m-ish square of nadir shots, one oblique shot in the middle,
/// one image without XMP, one without GPS and a stray text file
pub fn write_survey(root: &Path) {
    write_shot(&root.join("100MEDIA/DJI_0001.JPG"), &Shot::nadir(40.0, -74.0, 120.0));
    write_shot(&root.join("100MEDIA/DJI_0002.JPG"), &Shot::nadir(40.0, -73.999, 121.0));
    write_shot(&root.join("100MEDIA/DJI_0003.JPG"), &Shot::nadir(40.001, -73.999, 119.0));
    write_shot(&root.join("101MEDIA/DJI_0004.jpg"), &Shot::nadir(40.001, -74.0, 120.5));
    write_shot(
        &root.join("101MEDIA/DJI_0005.JPG"),
        &Shot::oblique(40.0005, -73.9995, 60.0, -90.0),
    );
    write_shot(
        &root.join("DJI_0006.JPG"),
        &Shot::nadir(40.0005, -73.9995, 300.0).without_xmp(),
    );
    fs::write(root.join("101MEDIA/DJI_0007.JPG"), jpeg_without_gps()).expect("write JPEG");
    fs::write(root.join("notes.txt"), "flight 1").expect("write notes");
}
