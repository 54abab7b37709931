//! Curve frames demo
//!
//! Builds a NURBS curve, samples its moving frames and writes an HTML page
//! in which a box slides from frame to frame.
//!
//! # Usage
//!
//! ```bash
//! # Default scene, written to curve_frames.html
//! curve_frames
//!
//! # Custom settings and output
//! curve_frames --config demo.json --output viewer/index.html
//!
//! # Show the effective settings
//! curve_frames --print-config
//! ```

use std::path::PathBuf;
use std::process;

use sweep_core::Result;
use sweep_demo::{build_viewer, DemoConfig};

fn print_usage() {
    eprintln!(
        r#"Curve frames demo

USAGE:
    curve_frames [OPTIONS]

OPTIONS:
    --config <file.json>    Load settings from a JSON file
    --output <file.html>    Where to write the viewer page (default: curve_frames.html)
    --json <file.json>      Also write a JSON snapshot of the scene
    --realtime              Run the timer at wall-clock pace
    --print-config          Print the effective settings as JSON and exit
    --help                  Show this help message

EXAMPLES:
    # Default scene
    curve_frames

    # Custom settings and output
    curve_frames --config demo.json --output viewer/index.html
"#
    );
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: Option<PathBuf>,
    realtime: bool,
    print_config: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("{flag} requires a path"))
        };
        match arg.as_str() {
            "--config" => options.config = Some(value("--config")?),
            "--output" => options.output = Some(value("--output")?),
            "--json" => options.json = Some(value("--json")?),
            "--realtime" => options.realtime = true,
            "--print-config" => options.print_config = true,
            "--help" | "-h" => options.help = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn run(options: Options) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(output) = options.output {
        config.output = output;
    }
    if options.json.is_some() {
        config.snapshot = options.json;
    }
    config.realtime |= options.realtime;

    if options.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let viewer = build_viewer(&config)?;
    let page = viewer.show()?;

    eprintln!("✓ Viewer written to: {}", page.display());
    if let Some(snapshot) = &config.snapshot {
        eprintln!("✓ Snapshot written to: {}", snapshot.display());
    }
    eprintln!();
    eprintln!("Open the HTML file in a web browser to watch the box move.");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_usage();
            process::exit(1);
        }
    };

    if options.help {
        print_usage();
        process::exit(0);
    }

    if let Err(e) = run(options) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
