mod args;

use std::process::ExitCode;

use args::Args;
use clap::Parser as _;
use log::error;
use noise_dashboard::{
    error::SelectError,
    selector::{FileFilter, latest_file},
};

/// Exit code when the directory holds no qualifying export.
const EXIT_NOT_FOUND: u8 = 2;

const EXIT_UNREADABLE: u8 = 1;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let filter = FileFilter {
        suffix: args.suffix,
        excluded_prefix: args.excluded_prefix,
        skip_hidden: !args.include_hidden,
    };

    match latest_file(&args.csv_dir, &filter) {
        Ok(latest) => {
            if args.path {
                println!("{}", latest.path.display());
            } else {
                println!("{}", latest.name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn exit_status(error: &SelectError) -> u8 {
    match error {
        SelectError::NoQualifyingFile(_) => EXIT_NOT_FOUND,
        SelectError::DirectoryUnreadable { .. } => EXIT_UNREADABLE,
    }
}
