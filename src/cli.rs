//! Defines command-line interface options using `clap` for the goes-stac tool.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for extracting STAC metadata from GOES-R ABI L2 netCDF files
#[derive(Parser, Debug)]
#[command(
    name = "goes-stac",
    version,
    about = "Extract STAC metadata from GOES-R ABI L2 netCDF files"
)]
pub struct Args {
    /// Path to the ABI L2 netCDF file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Print the STAC item as JSON to stdout
    #[arg(long)]
    pub stac_item: bool,

    /// Write the STAC item JSON to this path instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print a human-readable report of the parsed metadata
    #[arg(long)]
    pub describe: bool,

    /// Print the ground footprint as GeoJSON
    #[arg(long)]
    pub footprint: bool,

    /// Asset href recorded in the STAC item; defaults to the input path
    #[arg(long)]
    pub asset_href: Option<String>,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
