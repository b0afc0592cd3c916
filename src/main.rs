//! SVG Measure CLI
//!
//! Usage:
//!   svg-measure [OPTIONS] <FILE>
//!
//! Options:
//!   -s, --select <ID>        Select an element by id (repeatable, in order)
//!       --at <X,Y>           Click at a screen position (repeatable)
//!   -c, --config <FILE>      Configuration file (TOML format)
//!       --viewport <WxH>     Device viewport size in pixels
//!       --overlay <FILE>     Write the measurement overlay SVG
//!       --export <ID>        Export an element cropped to its painted extent
//!   -o, --output <FILE>      Output file for --export (stdout if omitted)
//!       --data-uri           Print the export as a base64 data URI
//!   -d, --debug              Debug logging
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use svg_measure::{select_by_id, MeasureConfig, ScreenPoint, Session};

#[derive(Parser)]
#[command(name = "svg-measure")]
#[command(about = "Measure sizes, offsets and gaps of SVG elements")]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Select an element by id; repeat to select a pair
    #[arg(short, long = "select", value_name = "ID")]
    select: Vec<String>,

    /// Click at a screen position, adding the topmost element there
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    at: Vec<(f64, f64)>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device viewport size, e.g. 1280x800
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    viewport: Option<(f64, f64)>,

    /// Write the measurement overlay SVG to this file
    #[arg(long, value_name = "FILE")]
    overlay: Option<PathBuf>,

    /// Export the element with this id as a cropped standalone SVG
    #[arg(long, value_name = "ID")]
    export: Option<String>,

    /// Output file for the export
    #[arg(short, long, requires = "export")]
    output: Option<PathBuf>,

    /// Print the export as a base64 data URI instead of SVG
    #[arg(long, requires = "export")]
    data_uri: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    debug: bool,
}

fn parse_pair(value: &str, separator: char) -> Result<(f64, f64), String> {
    let (a, b) = value
        .split_once(separator)
        .ok_or_else(|| format!("expected two numbers separated by '{}'", separator))?;
    let number = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}': {}", s.trim(), e))
    };
    Ok((number(a)?, number(b)?))
}

fn parse_point(value: &str) -> Result<(f64, f64), String> {
    parse_pair(value, ',')
}

fn parse_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = parse_pair(&value.to_ascii_lowercase(), 'x')?;
    if w > 0.0 && h > 0.0 {
        Ok((w, h))
    } else {
        Err("viewport size must be positive".to_string())
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match MeasureConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => MeasureConfig::default(),
    };
    if let Some((width, height)) = cli.viewport {
        config.viewport.width = width;
        config.viewport.height = height;
    }

    let mut session = Session::new(config);
    let document = match session.load_file(&cli.input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error loading '{}': {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };
    for diagnostic in document.diagnostics() {
        eprintln!("{}", diagnostic.format());
    }

    for id in &cli.select {
        if let Err(e) = select_by_id(&mut session, id) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
    for &(x, y) in &cli.at {
        if session.click_at(ScreenPoint::new(x, y), true).is_none() {
            eprintln!("Warning: nothing selectable at {},{}", x, y);
        }
    }

    let update = session.update();
    print!("{}", update.report);
    if !update.report.is_empty() {
        print!("{}", update.inspector);
    }

    if let Some(path) = &cli.overlay {
        let svg = session.overlay(&update);
        if let Err(e) = fs::write(path, svg) {
            eprintln!("Error writing overlay '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    if let Some(id) = &cli.export {
        let export = session
            .document()
            .and_then(|doc| doc.element_by_id(id))
            .and_then(|element| session.export(element));
        let Some(export) = export else {
            eprintln!("Error: no element with id '{}'", id);
            std::process::exit(1);
        };
        let content = if cli.data_uri {
            export.to_data_uri()
        } else {
            export.svg
        };
        match &cli.output {
            Some(path) => {
                if let Err(e) = fs::write(path, content) {
                    eprintln!("Error writing export '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            }
            None => println!("{}", content),
        }
    }
}
