use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use noise_dashboard::{noise::Thresholds, render::SortKey};

#[derive(Debug, Parser)]
#[command(version, about = "Renders a self-refreshing noise level dashboard from the newest CSV export")]
pub struct Args {
    /// Directory the sound level meter exports into.
    #[arg(long, env = "NOISE_CSV_DIR")]
    pub csv_dir: PathBuf,

    /// HTML file to (re)write after every successful refresh.
    #[arg(long, env = "NOISE_DASHBOARD_OUTPUT")]
    pub output: PathBuf,

    #[arg(long, env = "NOISE_DASHBOARD_JSON_OUTPUT")]
    pub json_output: Option<PathBuf>,

    #[arg(
        long,
        env = "NOISE_POLL_INTERVAL_SECS",
        default_value_t = 180,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    #[arg(long, env = "TZ", default_value = "UTC")]
    pub timezone: Tz,

    #[arg(long, default_value = "Messwerte")]
    pub title: String,

    /// Keep the first data row of each export instead of discarding it.
    #[arg(long)]
    pub keep_first_row: bool,

    #[arg(long, default_value = ".csv")]
    pub suffix: String,

    #[arg(long, default_value = "_gsdata_")]
    pub excluded_prefix: String,

    #[arg(long, value_enum)]
    pub sort_by: Option<SortColumn>,

    #[arg(long, requires = "sort_by")]
    pub descending: bool,

    #[arg(long, default_value_t = 6)]
    pub day_start_hour: u32,

    #[arg(long, default_value_t = 22)]
    pub day_end_hour: u32,

    #[arg(long, default_value_t = 55.0)]
    pub day_elevated: f64,

    #[arg(long, default_value_t = 60.0)]
    pub day_exceeded: f64,

    #[arg(long, default_value_t = 43.0)]
    pub night_elevated: f64,

    #[arg(long, default_value_t = 45.0)]
    pub night_exceeded: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Date,
    Time,
    Level,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Date => SortKey::Date,
            SortColumn::Time => SortKey::Time,
            SortColumn::Level => SortKey::Level,
        }
    }
}

impl Args {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            day_start_hour: self.day_start_hour,
            day_end_hour: self.day_end_hour,
            day_elevated: self.day_elevated,
            day_exceeded: self.day_exceeded,
            night_elevated: self.night_elevated,
            night_exceeded: self.night_exceeded,
        }
    }
}
