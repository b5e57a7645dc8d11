use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use chrono_tz::Tz;
use log::{info, warn};
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::{StreamExt as _, wrappers::IntervalStream};

use crate::{
    averager::aggregate,
    dashboard::Snapshot,
    error::FetchError,
    export::{ReadOptions, read_readings},
    selector::{FileFilter, latest_file},
    state::DashboardState,
};

const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub csv_dir: PathBuf,

    /// Time between refresh cycles. Values below one second are raised to one second.
    pub interval: Duration,

    pub filter: FileFilter,

    pub read_options: ReadOptions,

    /// Zone of the `refreshed_at` timestamp.
    pub timezone: Tz,
}

/// Runs a single cycle: newest export, parsed and averaged into a snapshot.
pub async fn refresh(config: &PollerConfig) -> Result<Snapshot, FetchError> {
    let (dir, filter) = (config.csv_dir.clone(), config.filter.clone());
    let latest = tokio::task::spawn_blocking(move || latest_file(&dir, &filter)).await??;

    let bytes = tokio::fs::read(&latest.path)
        .await
        .map_err(|source| FetchError::Read {
            path: latest.path.clone(),
            source,
        })?;

    let rows = read_readings(bytes.as_slice(), &config.read_options).map_err(|source| {
        FetchError::Export {
            path: latest.path.clone(),
            source,
        }
    })?;

    let aggregation = aggregate(&rows);
    if !aggregation.skipped.is_empty() {
        warn!(
            "skipped {} of {} rows in {}",
            aggregation.skipped.len(),
            rows.len(),
            latest.name
        );
    }

    let refreshed_at = Utc::now().with_timezone(&config.timezone).fixed_offset();

    Ok(Snapshot::new(latest.name, aggregation, refreshed_at))
}

/// Refreshes once and publishes the result. On failure the previous snapshot stays
/// in place. Returns whether a new snapshot was published.
pub async fn poll_once<F>(
    config: &PollerConfig,
    state: &DashboardState,
    on_refresh: &mut F,
) -> bool
where
    F: FnMut(&Snapshot),
{
    match refresh(config).await {
        Ok(snapshot) => {
            info!(
                "loaded {} buckets from {}",
                snapshot.readings.len(),
                snapshot.source_file
            );
            state.replace(snapshot);
            if let Some(current) = state.current() {
                on_refresh(&current);
            }
            true
        }
        Err(e) if e.is_no_qualifying_file() => {
            info!("nothing to display yet: {e}");
            false
        }
        Err(e) => {
            warn!("refresh failed, keeping previous data: {e}");
            false
        }
    }
}

/// Polls forever. The first cycle runs immediately; cycles never overlap.
pub async fn run<F>(config: PollerConfig, state: Arc<DashboardState>, mut on_refresh: F)
where
    F: FnMut(&Snapshot),
{
    let mut ticker = interval(config.interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = IntervalStream::new(ticker);
    while ticks.next().await.is_some() {
        poll_once(&config, &state, &mut on_refresh).await;
    }
}
