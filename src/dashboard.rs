use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{averager::Aggregation, noise::AggregatedReading};

/// Everything one refresh cycle produced. Replaced wholesale on the next cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub source_file: String,

    pub refreshed_at: DateTime<FixedOffset>,

    /// Most recent bucket first.
    pub readings: Vec<AggregatedReading>,

    pub skipped_rows: usize,
}

impl Snapshot {
    pub fn new(
        source_file: impl Into<String>,
        aggregation: Aggregation,
        refreshed_at: DateTime<FixedOffset>,
    ) -> Self {
        let mut readings = aggregation.readings;
        readings.reverse();

        Self {
            source_file: source_file.into(),
            refreshed_at,
            readings,
            skipped_rows: aggregation.skipped.len(),
        }
    }

    pub fn latest(&self) -> Option<&AggregatedReading> {
        self.readings.first()
    }

    /// Readings oldest first, as plotted on the chart.
    pub fn chronological(&self) -> impl Iterator<Item = &AggregatedReading> {
        self.readings.iter().rev()
    }
}
