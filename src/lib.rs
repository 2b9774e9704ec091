//! hand2voc: hand-detection MAT annotations to Pascal VOC XML.
//!
//! Each `.mat` record of the hand dataset describes every hand as four
//! corner points. hand2voc reduces each quadrilateral to an axis-aligned
//! box, reads the size of the matching `.jpg` and writes one VOC XML file
//! per record.
//!
//! # Modules
//!
//! - [`mat`]: MATLAB Level 5 MAT-file reader
//! - [`record`]: Extraction of per-hand corner points from a record
//! - [`geometry`]: Corner points and bounding-box reduction
//! - [`image_info`]: Image dimension lookup
//! - [`voc`]: Pascal VOC XML rendering
//! - [`conversion`]: The batch pipeline and its report
//! - [`error`]: Error types for hand2voc operations

pub mod config;
pub mod conversion;
pub mod error;
pub mod geometry;
pub mod image_info;
pub mod mat;
pub mod record;
pub mod voc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use config::ConvertConfig;
pub use conversion::{convert_dataset, ConversionReport};
pub use error::Hand2VocError;

use config::{DEFAULT_ANNOTATIONS_DIR, DEFAULT_IMAGES_DIR, DEFAULT_OUTPUT_DIR};
use geometry::ExtentFloor;
use image_info::AxisOrder;

/// The hand2voc CLI application.
#[derive(Parser)]
#[command(name = "hand2voc")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert every .mat record into a Pascal VOC XML file.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Directory containing the .mat annotation records.
    #[arg(long, default_value = DEFAULT_ANNOTATIONS_DIR)]
    annotations: PathBuf,

    /// Directory containing the {name}.jpg image for every record.
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    images: PathBuf,

    /// Existing directory that receives the {name}.xml files.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Starting value of the running box maximum.
    #[arg(long, value_enum, default_value = "neg-infinity")]
    extent_floor: ExtentFloorArg,

    /// Mapping of image axes onto <width> and <height>.
    #[arg(long, value_enum, default_value = "columns")]
    axis_order: AxisOrderArg,

    /// Output format for the conversion report.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExtentFloorArg {
    /// Exact minimum/maximum for any coordinates.
    NegInfinity,
    /// Maxima never drop below -1.
    Legacy,
}

impl From<ExtentFloorArg> for ExtentFloor {
    fn from(value: ExtentFloorArg) -> Self {
        match value {
            ExtentFloorArg::NegInfinity => ExtentFloor::NegInfinity,
            ExtentFloorArg::Legacy => ExtentFloor::Legacy,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AxisOrderArg {
    /// Width is the column count.
    Columns,
    /// Width is the row count.
    Legacy,
}

impl From<AxisOrderArg> for AxisOrder {
    fn from(value: AxisOrderArg) -> Self {
        match value {
            AxisOrderArg::Columns => AxisOrder::Columns,
            AxisOrderArg::Legacy => AxisOrder::Legacy,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the hand2voc CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Hand2VocError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("hand2voc {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert hand-detection .mat annotations to Pascal VOC XML.");
            println!();
            println!("Run 'hand2voc --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), Hand2VocError> {
    let config = ConvertConfig::new(args.annotations, args.images, args.output)
        .with_extent_floor(args.extent_floor.into())
        .with_axis_order(args.axis_order.into());

    let report = convert_dataset(&config)?;

    match args.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    Ok(())
}
