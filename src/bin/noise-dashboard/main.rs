mod args;

use std::{fs, path::Path, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use log::{error, info};
use tokio::task::block_in_place;
use noise_dashboard::{
    dashboard::Snapshot,
    export::ReadOptions,
    poller::{self, PollerConfig},
    render::{RenderOptions, SortOrder, render_html, render_json},
    selector::FileFilter,
    state::DashboardState,
};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let config = PollerConfig {
        csv_dir: args.csv_dir.clone(),
        interval: Duration::from_secs(args.interval_secs),
        filter: FileFilter {
            suffix: args.suffix.clone(),
            excluded_prefix: args.excluded_prefix.clone(),
            ..FileFilter::default()
        },
        read_options: ReadOptions {
            skip_first_row: !args.keep_first_row,
        },
        timezone: args.timezone,
    };

    let options = RenderOptions {
        title: args.title.clone(),
        refresh_secs: args.interval_secs,
        thresholds: args.thresholds(),
        sort: args.sort_by.map(|column| {
            let order = if args.descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            (column.into(), order)
        }),
    };

    // Placeholder page until the first export shows up.
    let placeholder = render_html(None, &options);
    block_in_place(|| write_atomically(&args.output, &placeholder))
        .with_context(|| format!("failed to write {:?}", args.output))?;

    let state = Arc::new(DashboardState::new());

    info!(
        "watching {:?} every {}s, writing {:?}",
        config.csv_dir, args.interval_secs, args.output
    );

    let on_refresh = |snapshot: &Snapshot| {
        if let Err(e) = block_in_place(|| publish(snapshot, &args, &options)) {
            error!("failed to publish dashboard: {e:#}");
        }
    };

    tokio::select! {
        _ = poller::run(config, state, on_refresh) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

/// Writes the rendered views. Blocking; runtime callers wrap it in `block_in_place`.
fn publish(snapshot: &Snapshot, args: &Args, options: &RenderOptions) -> Result<()> {
    write_atomically(&args.output, &render_html(Some(snapshot), options))
        .with_context(|| format!("failed to write {:?}", args.output))?;

    if let Some(path) = &args.json_output {
        let json = render_json(snapshot).context("failed to serialize snapshot")?;
        write_atomically(path, &json).with_context(|| format!("failed to write {path:?}"))?;
    }

    if let Some(latest) = snapshot.latest() {
        info!(
            "latest: {} {} {} dB(A) ({})",
            latest.date,
            latest.time_label,
            latest.mean_level,
            options.thresholds.classify_reading(latest).css_class()
        );
    }

    Ok(())
}

/// Readers of `path` see either the old or the new file, never a partial write.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    fs::write(&tmp, contents).with_context(|| format!("failed to write {tmp:?}"))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to rename {tmp:?}"))?;

    Ok(())
}
