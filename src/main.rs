//! `pifm` command line front end.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pifm::anfatec::{ClosingLine, TextEncoding};
use pifm::export::{ScanSummary, write_array, write_dataset};
use pifm::{HyperImage, LoadOptions, Window, hyperslice};

#[derive(Parser)]
#[command(name = "pifm")]
#[command(author, version, long_about = None)]
#[command(about = "Inspect and export PiFM hyperspectral scans")]
struct Cli {
    /// JSON file with load options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Text encoding of the parameter and wavelength files
    #[arg(long, global = true, value_parser = parse_encoding)]
    encoding: Option<TextEncoding>,

    /// Drop the key/value content of descriptor closing lines
    #[arg(long, global = true)]
    discard_closing_line: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show scan geometry, channels and parameters
    Info {
        /// ANFATEC parameter file
        params: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sum the cube over a wavenumber range and save it as .npy
    Slice {
        /// ANFATEC parameter file
        params: PathBuf,

        /// Start wavenumber
        #[arg(long, allow_hyphen_values = true)]
        start: i64,

        /// Stop wavenumber
        #[arg(long, allow_hyphen_values = true)]
        stop: i64,

        /// Row window BEGIN:END (half-open)
        #[arg(long, value_parser = parse_window)]
        rows: Option<Window>,

        /// Column window BEGIN:END (half-open)
        #[arg(long, value_parser = parse_window)]
        cols: Option<Window>,

        /// Output .npy file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export cube, channels, wavelengths and metadata to a directory
    Export {
        /// ANFATEC parameter file
        params: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the flattened observation matrix divided by this power
        #[arg(long)]
        laser_power: Option<f64>,
    },
}

fn parse_encoding(s: &str) -> Result<TextEncoding, String> {
    s.parse()
}

fn parse_window(s: &str) -> Result<Window, String> {
    let (begin, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected BEGIN:END, got '{s}'"))?;
    let begin = begin
        .trim()
        .parse()
        .map_err(|e| format!("invalid window start '{begin}': {e}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid window end '{end}': {e}"))?;
    Ok((begin, end))
}

fn load_options(cli: &Cli) -> pifm::Result<LoadOptions> {
    let mut options = match &cli.config {
        Some(path) => LoadOptions::from_json_file(path)?,
        None => LoadOptions::default(),
    };
    if let Some(encoding) = cli.encoding {
        options.parser.encoding = encoding;
    }
    if cli.discard_closing_line {
        options.parser.closing_line = ClosingLine::Discard;
    }
    Ok(options)
}

fn open(params: &Path, options: &LoadOptions) -> pifm::Result<HyperImage> {
    HyperImage::open_with(params, options)
}

fn run(cli: &Cli) -> pifm::Result<()> {
    let options = load_options(cli)?;

    match &cli.command {
        Commands::Info { params, json } => {
            let hyper = open(params, &options)?;
            let summary = ScanSummary::new(&hyper);
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.to_text());
            }
        }
        Commands::Slice {
            params,
            start,
            stop,
            rows,
            cols,
            output,
        } => {
            let hyper = open(params, &options)?;
            let slc = hyperslice(&hyper, *start, *stop, *rows, *cols)?;
            write_array(output, &slc)?;
            println!(
                "Wrote {}x{} slice to {}",
                slc.nrows(),
                slc.ncols(),
                output.display()
            );
        }
        Commands::Export {
            params,
            output,
            laser_power,
        } => {
            let hyper = open(params, &options)?;
            for path in write_dataset(&hyper, output, *laser_power)? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
