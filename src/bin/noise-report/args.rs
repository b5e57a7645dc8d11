use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(version, about = "Prints quarter-hour averages of a CSV export as CSV")]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["file", "csv_dir"])))]
pub struct Args {
    /// Export to aggregate. Takes precedence over `--csv-dir`.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Aggregate the newest export in this directory instead.
    #[arg(long, env = "NOISE_CSV_DIR")]
    pub csv_dir: Option<PathBuf>,

    #[arg(long)]
    pub keep_first_row: bool,

    /// Print only the most recent bucket.
    #[arg(long)]
    pub latest_only: bool,

    /// Oldest bucket first instead of most recent first.
    #[arg(long)]
    pub chronological: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only test in this binary that touches NOISE_CSV_DIR.
    #[test]
    fn file_is_accepted_while_csv_dir_env_is_set() {
        unsafe { std::env::remove_var("NOISE_CSV_DIR") };
        assert!(Args::try_parse_from(["noise-report"]).is_err());

        unsafe { std::env::set_var("NOISE_CSV_DIR", "/data/csv") };
        let with_file = Args::try_parse_from(["noise-report", "--file", "x.csv"]);
        let env_only = Args::try_parse_from(["noise-report"]);
        unsafe { std::env::remove_var("NOISE_CSV_DIR") };

        let with_file = with_file.unwrap();
        assert_eq!(with_file.file, Some(PathBuf::from("x.csv")));
        assert_eq!(with_file.csv_dir, Some(PathBuf::from("/data/csv")));

        let env_only = env_only.unwrap();
        assert_eq!(env_only.file, None);
        assert_eq!(env_only.csv_dir, Some(PathBuf::from("/data/csv")));
    }

    #[test]
    fn both_flags_may_be_given() {
        let args =
            Args::try_parse_from(["noise-report", "--file", "x.csv", "--csv-dir", "/exports"])
                .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("x.csv")));
        assert_eq!(args.csv_dir, Some(PathBuf::from("/exports")));
    }
}
