//! Entry point for the goes-stac tool.
//! Handles CLI parsing, opens the netCDF file, and dispatches metadata
//! extraction to the library.

use clap::Parser;
use log::{debug, info};
use std::fs;

use goes_stac::dataset::Dataset;
use goes_stac::stac::StacItem;

mod cli;
use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    let dataset = Dataset::open(&args.file)?;
    info!("opened {}", args.file.display());
    debug!("parsed file name: {:?}", dataset.file_name);

    let write_item = args.stac_item || args.output.is_some();

    if write_item {
        let href = args
            .asset_href
            .clone()
            .unwrap_or_else(|| args.file.display().to_string());
        let item = StacItem::from_dataset(&dataset, &href);
        let json = item.to_json_pretty()?;
        match args.output {
            Some(path) => {
                fs::write(&path, json)?;
                info!("wrote STAC item to {}", path.display());
            }
            None => println!("{json}"),
        }
    }

    if args.footprint {
        println!("{}", serde_json::to_string_pretty(&dataset.geometry.footprint)?);
    }

    // the report is the default action when nothing else was requested
    if args.describe || (!write_item && !args.footprint) {
        dataset.print_report();
    }

    Ok(())
}
