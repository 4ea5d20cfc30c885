use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for car-dash
#[derive(Parser, Debug)]
#[command(version, about = "Used-car listings dashboard")]
pub struct Args {
    /// Listings file (.csv or .json)
    #[arg(default_value = "car_price_clean_data2.csv")]
    pub path: PathBuf,

    /// File name suggested when exporting the filtered view
    #[arg(long = "export-path", default_value = "filtered_data.csv")]
    pub export_path: PathBuf,
}
