//! CLI for face orientation analysis.
//!
//! Reads `{"imageBase64": "..."}` from stdin and prints a JSON report.
//!
//! Usage:
//!   face-orientation --detector seeta_fd_frontal_v1.0.bin < request.json
//!   face-orientation --regions regions.json --input request.json --pretty
//!
//! Exit status: 0 on success, 1 when the image cannot be decoded, 2 when no
//! face is found, 3 for setup failures (bad arguments, models, config files).

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::Parser;
use face_orientation::{Analyzer, DetectionConfig, Error, FixedRegions, RegionProvider, Report};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "face-orientation")]
#[command(author, version, about = "Face yaw orientation from face, eye and nose boxes", long_about = None)]
struct Args {
    /// Request file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// SeetaFace face detector model path. SeetaFace finds faces only, so
    /// eyes and nose stay empty and the result is `unknown` or no face; use
    /// --regions for full classification
    #[arg(long, conflicts_with = "regions", required_unless_present = "regions")]
    detector: Option<PathBuf>,

    /// Pre-computed candidate regions (JSON)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Detection parameters (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum face size for detection (overrides the config file)
    #[arg(long)]
    min_face_size: Option<u32>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Show verbose output on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status for argument errors, distinct from the no-face status.
const USAGE_EXIT_CODE: i32 = 3;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };
    init_tracing(args.verbose);

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => Report::from(e),
    };

    let exit_code = report.exit_code();
    match render(&report, args.pretty) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(Error::from(e).exit_code());
        }
    }
    std::process::exit(exit_code);
}

/// `--help` and `--version` succeed; every other parse failure is a usage error.
fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<Report, Error> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(?path, "loading detection config");
            DetectionConfig::load(path)?
        }
        None => DetectionConfig::default(),
    };
    if let Some(size) = args.min_face_size {
        config.face_min_size = size;
    }

    let provider = load_provider(args)?;
    let analyzer = Analyzer::new(provider).config(config);

    let raw = read_request(args)?;
    info!(bytes = raw.len(), "read request");
    Ok(analyzer.analyze_payload(&raw))
}

fn load_provider(args: &Args) -> Result<Box<dyn RegionProvider>, Error> {
    if let Some(path) = &args.regions {
        debug!(?path, "loading candidate regions");
        return Ok(Box::new(FixedRegions::load(path)?));
    }

    match &args.detector {
        Some(path) => load_detector(path),
        None => Err(Error::Provider("either --detector or --regions is required".into())),
    }
}

#[cfg(feature = "rustface")]
fn load_detector(path: &Path) -> Result<Box<dyn RegionProvider>, Error> {
    debug!(?path, "loading face detector");
    Ok(Box::new(face_orientation::RustfaceProvider::load(path)?))
}

#[cfg(not(feature = "rustface"))]
fn load_detector(path: &Path) -> Result<Box<dyn RegionProvider>, Error> {
    Err(Error::Provider(format!(
        "cannot load {}: built without the `rustface` feature",
        path.display()
    )))
}

fn read_request(args: &Args) -> Result<String, Error> {
    match &args.input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn render(report: &Report, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
