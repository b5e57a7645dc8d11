use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Prints the name of the most recently modified CSV export")]
pub struct Args {
    #[arg(long, env = "NOISE_CSV_DIR")]
    pub csv_dir: PathBuf,

    #[arg(long, default_value = ".csv")]
    pub suffix: String,

    #[arg(long, default_value = "_gsdata_")]
    pub excluded_prefix: String,

    /// Consider dot-files too.
    #[arg(long)]
    pub include_hidden: bool,

    /// Print the full path instead of the file name.
    #[arg(long)]
    pub path: bool,
}
