//! Export functionality for survey overlays
//!
//! Writes the accepted images as KML placemarks, the site boundary as a KML
//! polygon, and optionally a CSV inspection report and a GeoJSON overlay.

use crate::error::Result;
use crate::types::{Heading, ImageKind, ImageRecord, SurveyOptions, SurveyReport};
use geo::Polygon;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const POINTS_FILE: &str = "Points.kml";
pub const BOUNDARY_FILE: &str = "Boundary.kml";
pub const INSPECTION_FILE: &str = "Images.csv";
pub const GEOJSON_FILE: &str = "Survey.geojson";
pub const LOG_FILE: &str = "LOGFILE.txt";

const KML_NS: &str = "http://www.opengis.net/kml/2.2";
const DIRECTIONAL_ICON: &str =
    "http://earth.google.com/images/kml-icons/track-directional/track-0.png";
const PLAIN_ICON: &str = "http://maps.google.com/mapfiles/kml/pushpin/wht-pushpin.png";

/// Output file locations for one survey
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub output_dir: PathBuf,
    pub points_kml: PathBuf,
    pub boundary_kml: PathBuf,
    pub inspection_csv: PathBuf,
    pub geojson: PathBuf,
    pub log_file: PathBuf,
}

/// Files actually written by [`write_outputs`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub points_kml: Option<PathBuf>,
    pub boundary_kml: Option<PathBuf>,
    pub inspection_csv: Option<PathBuf>,
    pub geojson: Option<PathBuf>,
}

/// Compute every output path under one folder
pub fn compute_export_paths(output_dir: &Path) -> ExportPaths {
    ExportPaths {
        output_dir: output_dir.to_path_buf(),
        points_kml: output_dir.join(POINTS_FILE),
        boundary_kml: output_dir.join(BOUNDARY_FILE),
        inspection_csv: output_dir.join(INSPECTION_FILE),
        geojson: output_dir.join(GEOJSON_FILE),
        log_file: output_dir.join(LOG_FILE),
    }
}

/// Write every overlay enabled in `options`
pub fn write_outputs(report: &SurveyReport, options: &SurveyOptions) -> Result<ExportReport> {
    let paths = compute_export_paths(&options.resolved_output_dir());
    let mut written = ExportReport::default();

    if !paths.output_dir.exists() {
        fs::create_dir_all(&paths.output_dir)?;
        debug!("Created output directory: {}", paths.output_dir.display());
    }

    export_points_kml(&report.accepted, &paths.points_kml)?;
    written.points_kml = Some(paths.points_kml.clone());

    if let Some(boundary) = &report.boundary {
        export_boundary_kml(boundary, &paths.boundary_kml)?;
        written.boundary_kml = Some(paths.boundary_kml.clone());
    }

    if options.info {
        #[cfg(feature = "csv")]
        {
            export_inspection_csv(&report.accepted, &paths.inspection_csv)?;
            written.inspection_csv = Some(paths.inspection_csv.clone());
        }
        #[cfg(not(feature = "csv"))]
        tracing::warn!("Inspection report requested but the csv feature is disabled");
    }

    if options.geojson {
        #[cfg(feature = "json")]
        {
            export_geojson(&report.accepted, report.boundary.as_ref(), &paths.geojson)?;
            written.geojson = Some(paths.geojson.clone());
        }
        #[cfg(not(feature = "json"))]
        tracing::warn!("GeoJSON output requested but the json feature is disabled");
    }

    Ok(written)
}

/// Escape text for XML content and attribute values
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// KML style id for a class/heading combination
pub fn style_id(kind: ImageKind, heading: Option<Heading>) -> String {
    match (kind, heading) {
        (ImageKind::Unknown, _) | (_, None) => kind.as_str().to_string(),
        (_, Some(heading)) => format!("{}-{}", kind.as_str(), heading),
    }
}

/// KML colour (aabbggrr) per image class
fn kind_color(kind: ImageKind) -> &'static str {
    match kind {
        ImageKind::Nadir => "ff00ff00",
        ImageKind::Oblique => "ff0080ff",
        ImageKind::Unknown => "ff999999",
    }
}

fn write_kml_header(w: &mut impl Write, name: &str) -> std::io::Result<()> {
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(w, r#"<kml xmlns="{}">"#, KML_NS)?;
    writeln!(w, "<Document>")?;
    writeln!(w, "  <name>{}</name>", xml_escape(name))
}

fn write_kml_footer(w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "</Document>")?;
    writeln!(w, "</kml>")
}

fn write_icon_style(
    w: &mut impl Write,
    kind: ImageKind,
    heading: Option<Heading>,
) -> std::io::Result<()> {
    writeln!(w, r#"  <Style id="{}">"#, style_id(kind, heading))?;
    writeln!(w, "    <IconStyle>")?;
    writeln!(w, "      <color>{}</color>", kind_color(kind))?;
    match heading {
        Some(heading) => {
            writeln!(w, "      <heading>{:.1}</heading>", heading.degrees())?;
            writeln!(w, "      <Icon><href>{}</href></Icon>", DIRECTIONAL_ICON)?;
        }
        None => writeln!(w, "      <Icon><href>{}</href></Icon>", PLAIN_ICON)?,
    }
    writeln!(w, "    </IconStyle>")?;
    writeln!(w, "  </Style>")
}

fn placemark_description(record: &ImageRecord) -> String {
    let mut lines = vec![format!("Type: {}", record.kind)];
    if let Some(pitch) = record.pitch() {
        lines.push(format!("Gimbal pitch: {:.1}°", pitch));
    }
    if let (Some(yaw), Some(heading)) = (record.yaw(), record.heading()) {
        lines.push(format!("Gimbal yaw: {:.1}° ({})", yaw, heading));
    }
    lines.push(format!("GPS altitude: {:.1} m", record.gps.altitude));
    if let Some(relative) = record.relative_altitude() {
        lines.push(format!("Relative altitude: {:.1} m", relative));
    }
    lines.push(format!("Path: {}", record.path.display()));
    lines.join("\n")
}

/// Export image positions as KML placemarks styled by class and heading
pub fn export_points_kml(records: &[ImageRecord], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut w = BufWriter::new(file);

    write_kml_header(&mut w, "Survey images")?;

    for kind in [ImageKind::Nadir, ImageKind::Oblique] {
        for heading in Heading::ALL {
            write_icon_style(&mut w, kind, Some(heading))?;
        }
        write_icon_style(&mut w, kind, None)?;
    }
    write_icon_style(&mut w, ImageKind::Unknown, None)?;

    for record in records {
        writeln!(w, "  <Placemark>")?;
        writeln!(w, "    <name>{}</name>", xml_escape(record.file_name()))?;
        writeln!(
            w,
            "    <description>{}</description>",
            xml_escape(&placemark_description(record))
        )?;
        writeln!(
            w,
            "    <styleUrl>#{}</styleUrl>",
            style_id(record.kind, record.heading())
        )?;
        writeln!(
            w,
            "    <Point><coordinates>{:.7},{:.7},{:.2}</coordinates></Point>",
            record.gps.longitude, record.gps.latitude, record.gps.altitude
        )?;
        writeln!(w, "  </Placemark>")?;
    }

    write_kml_footer(&mut w)?;
    w.flush()?;

    info!(
        "Exported {} placemarks to: {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

/// Export the site boundary as a single KML polygon
pub fn export_boundary_kml(boundary: &Polygon<f64>, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut w = BufWriter::new(file);

    write_kml_header(&mut w, "Site boundary")?;
    writeln!(w, r#"  <Style id="boundary">"#)?;
    writeln!(w, "    <LineStyle><color>ff0000ff</color><width>2</width></LineStyle>")?;
    writeln!(w, "    <PolyStyle><color>400000ff</color></PolyStyle>")?;
    writeln!(w, "  </Style>")?;

    writeln!(w, "  <Placemark>")?;
    writeln!(w, "    <name>Site boundary</name>")?;
    writeln!(w, "    <styleUrl>#boundary</styleUrl>")?;
    writeln!(w, "    <Polygon>")?;
    writeln!(w, "      <tessellate>1</tessellate>")?;
    writeln!(w, "      <outerBoundaryIs><LinearRing><coordinates>")?;
    for coord in boundary.exterior().coords() {
        writeln!(w, "        {:.7},{:.7},0", coord.x, coord.y)?;
    }
    writeln!(w, "      </coordinates></LinearRing></outerBoundaryIs>")?;
    writeln!(w, "    </Polygon>")?;
    writeln!(w, "  </Placemark>")?;

    write_kml_footer(&mut w)?;
    w.flush()?;

    info!("Exported site boundary to: {}", output_path.display());
    Ok(())
}

/// Export the per-image inspection report
#[cfg(feature = "csv")]
pub fn export_inspection_csv(records: &[ImageRecord], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "path",
        "type",
        "latitude",
        "longitude",
        "altitude",
        "pitch",
        "yaw",
        "heading",
    ])?;

    let optional = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_default();

    for record in records {
        writer.write_record([
            record.path.display().to_string(),
            record.kind.code().to_string(),
            format!("{:.7}", record.gps.latitude),
            format!("{:.7}", record.gps.longitude),
            format!("{:.2}", record.gps.altitude),
            optional(record.pitch()),
            optional(record.yaw()),
            record
                .heading()
                .map(|h| h.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    info!("Exported inspection report to: {}", output_path.display());
    Ok(())
}

/// Export points and boundary as a GeoJSON FeatureCollection
#[cfg(feature = "json")]
pub fn export_geojson(
    records: &[ImageRecord],
    boundary: Option<&Polygon<f64>>,
    output_path: &Path,
) -> Result<()> {
    use serde_json::{json, Value};

    let mut features: Vec<Value> = records
        .iter()
        .map(|record| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [record.gps.longitude, record.gps.latitude, record.gps.altitude],
                },
                "properties": {
                    "name": record.file_name(),
                    "path": record.path.display().to_string(),
                    "type": record.kind.as_str(),
                    "pitch": record.pitch(),
                    "yaw": record.yaw(),
                    "heading": record.heading().map(|h| h.as_str()),
                },
            })
        })
        .collect();

    if let Some(boundary) = boundary {
        let ring: Vec<[f64; 2]> = boundary.exterior().coords().map(|c| [c.x, c.y]).collect();
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": { "name": "Site boundary" },
        }));
    }

    let collection = json!({ "type": "FeatureCollection", "features": features });
    let mut w = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut w, &collection)?;
    w.flush()?;

    info!("Exported GeoJSON to: {}", output_path.display());
    Ok(())
}
