//! CLI binary for Mission Assistant
//!
//! Inspects drone images on site and maps them to KML overlays.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use mission_assistant::{
    compute_export_paths, missing_inputs, run_survey, write_outputs, AltitudeRange,
    AltitudeSource, KindFilter, SurveyOptions, DEFAULT_NADIR_LIMIT,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn version() -> String {
    format!(
        "{} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown commit")
    )
}

fn build_command() -> Command {
    Command::new("MissionAssistant")
        .version(version())
        .about("Mission Assistant: Inspect drone images on site to detect problems")
        .after_help("Usage Example: mission_assistant -i -t N -a 1.0 100.0 /media/DCIM /tmp/OUTPUT")
        .arg(
            Arg::new("infolder")
                .help("Input folder with JPG images. Even subfolders are searched for JPG files. Glob patterns are expanded.")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("outfolder")
                .help("KML output is written to this folder. If not specified, it is written to input folder.")
                .required(false)
                .index(2),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .help("Image type Nadir (N), Oblique (O), Any (A). Defaults to (A)")
                .value_parser(["N", "O", "A"])
                .ignore_case(true)
                .default_value("A"),
        )
        .arg(
            Arg::new("alt")
                .short('a')
                .long("alt")
                .help("Specify min followed by max altitude. Only images in this range are considered.")
                .num_args(2)
                .value_names(["MIN", "MAX"])
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Debug option. Collects extra information in log file for debugging purposes.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Inspect option. Writes image information to Images.csv for informational purposes.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("nadir-limit")
                .long("nadir-limit")
                .help("Gimbal pitch (degrees) below which an image counts as nadir")
                .value_name("DEG")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64))
                .default_value("-88.0"),
        )
        .arg(
            Arg::new("altitude-source")
                .long("altitude-source")
                .help("Altitude compared against --alt: EXIF GPS altitude or DJI relative altitude")
                .value_parser(["gps", "relative"])
                .default_value("gps"),
        )
        .arg(
            Arg::new("geojson")
                .long("geojson")
                .help("Also write Survey.geojson (requires the json feature)")
                .action(ArgAction::SetTrue),
        )
}

fn options_from_matches(matches: &clap::ArgMatches, infolder: &str) -> Result<SurveyOptions> {
    let kind_filter: KindFilter = matches
        .get_one::<String>("type")
        .map(|s| s.parse::<KindFilter>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let altitude_source: AltitudeSource = matches
        .get_one::<String>("altitude-source")
        .map(|s| s.parse::<AltitudeSource>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let altitude = match matches.get_many::<f64>("alt") {
        Some(values) => {
            let values: Vec<f64> = values.copied().collect();
            AltitudeRange::new(values[0], values[1])
        }
        None => AltitudeRange::default(),
    };

    let output_dir = matches
        .get_one::<String>("outfolder")
        .map(PathBuf::from);

    Ok(SurveyOptions {
        inputs: vec![infolder.to_string()],
        output_dir,
        kind_filter,
        altitude,
        altitude_source,
        nadir_limit: matches
            .get_one::<f64>("nadir-limit")
            .copied()
            .unwrap_or(DEFAULT_NADIR_LIMIT),
        info: matches.get_flag("info"),
        debug: matches.get_flag("debug"),
        geojson: matches.get_flag("geojson"),
    })
}

/// Console verbosity when RUST_LOG is unset; raw metadata dumps stay in the log file
const CONSOLE_LOG_DEFAULT: &str = "info";

fn file_log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Log to stderr and to LOGFILE.txt in the output folder
fn init_logging(log_path: &Path, debug: bool) -> Result<()> {
    let log_file = File::create(log_path)
        .with_context(|| format!("Cannot create log file {}", log_path.display()))?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONSOLE_LOG_DEFAULT));
    let file_level = file_log_level(debug);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(file_level),
        )
        .try_init()
        .context("Cannot install logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    // No input folder, show help and exit
    let infolder = match matches.get_one::<String>("infolder") {
        Some(folder) => folder.clone(),
        None => {
            build_command().print_help()?;
            eprintln!();
            std::process::exit(1);
        }
    };

    let options = options_from_matches(&matches, &infolder)?;
    if let Some(missing) = missing_inputs(&options.inputs).first() {
        bail!("Input folder {} does not exist", missing);
    }
    let paths = compute_export_paths(&options.resolved_output_dir());

    // Only an explicit OUTFOLDER may be created; the default is the existing input
    if options.output_dir.is_some() {
        fs::create_dir_all(&paths.output_dir).with_context(|| {
            format!(
                "Cannot create output folder {}. Do you have permission?",
                paths.output_dir.display()
            )
        })?;
    }
    init_logging(&paths.log_file, options.debug)?;

    if options.debug {
        println!(
            "Debug flag : {}, Info flag : {}",
            options.debug, options.info
        );
        println!("Type of images required: {:?}", options.kind_filter);
        println!(
            "Min altitude : {}, Max altitude : {}",
            options.altitude.min(),
            options.altitude.max()
        );
    }

    let report = run_survey(&options)?;

    if report.is_empty() {
        println!("Couldn't find anything to process!!");
        return Ok(());
    }

    let written = write_outputs(&report, &options)?;

    println!(
        "Processed {} images: {} mapped ({} nadir, {} oblique), {} skipped",
        report.images_found,
        report.accepted.len(),
        report.nadir_count(),
        report.oblique_count(),
        report.skipped.len()
    );
    if let Some(path) = written.points_kml {
        println!("KML file ({}) created", path.display());
    }
    match written.boundary_kml {
        Some(path) => println!("KML file ({}) created", path.display()),
        None => println!("No site boundary: image positions don't enclose an area"),
    }
    if let Some(path) = written.inspection_csv {
        println!("Inspection report ({}) created", path.display());
    }
    if let Some(path) = written.geojson {
        println!("GeoJSON file ({}) created", path.display());
    }
    println!("Log written to {}", paths.log_file.display());

    Ok(())
}
