mod args;

use std::{fs::File, io, path::PathBuf, process::ExitCode};

use anyhow::{Context as _, Result, anyhow};
use args::Args;
use chrono::Local;
use clap::Parser as _;
use log::{error, warn};
use noise_dashboard::{
    averager::aggregate,
    dashboard::Snapshot,
    export::{ReadOptions, read_readings},
    noise::{AggregatedReading, Thresholds},
    selector::{FileFilter, latest_file},
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let path = source_path(&args)?;
    let file = File::open(&path).with_context(|| format!("failed to open file: {path:?}"))?;
    let options = ReadOptions {
        skip_first_row: !args.keep_first_row,
    };
    let rows = read_readings(file, &options)
        .with_context(|| format!("failed to read CSV export: {path:?}"))?;

    let aggregation = aggregate(&rows);
    for skipped in &aggregation.skipped {
        warn!("row {}: {}", skipped.index, skipped.error);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let snapshot = Snapshot::new(name, aggregation, Local::now().fixed_offset());

    let selected: Vec<&AggregatedReading> = if args.latest_only {
        snapshot.latest().into_iter().collect()
    } else if args.chronological {
        snapshot.chronological().collect()
    } else {
        snapshot.readings.iter().collect()
    };

    write_report(io::stdout().lock(), &selected, &Thresholds::default())
        .context("failed to write report")
}

fn source_path(args: &Args) -> Result<PathBuf> {
    if let Some(file) = &args.file {
        return Ok(file.clone());
    }

    let dir = args
        .csv_dir
        .as_ref()
        .ok_or_else(|| anyhow!("either --file or --csv-dir is required"))?;
    let latest = latest_file(dir, &FileFilter::default())
        .with_context(|| format!("failed to select latest export in {dir:?}"))?;

    Ok(latest.path)
}

fn write_report<W: io::Write>(
    out: W,
    readings: &[&AggregatedReading],
    thresholds: &Thresholds,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(["Datum", "Systemzeit", "LAS Mittelwert", "Bewertung"])?;
    for reading in readings {
        let level = reading.mean_level.to_string();
        let severity = thresholds.classify_reading(reading);
        writer.write_record([
            reading.date.as_str(),
            reading.time_label.as_str(),
            level.as_str(),
            severity.css_class(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
