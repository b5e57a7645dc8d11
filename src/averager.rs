//! Quarter-hour averaging of raw readings.
//!
//! Rows are consumed in file order. Consecutive rows whose minute falls in the same
//! quarter of the hour form a run, and every run yields one [`AggregatedReading`].
//! A quarter that reappears after a different one starts a new run; rows are never
//! regrouped across runs.
//!
//! Date attribution is asymmetric: a run closed by a quarter change takes the date of
//! the row that closed it, the final run takes the date of the last input row (even if
//! that row itself was skipped).

use log::warn;

use crate::{
    error::RowError,
    noise::{AggregatedReading, Level, RawReading},
};

/// Quarter of the hour a minute falls into, `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterHour(u8);

impl QuarterHour {
    pub fn from_minute(minute: u32) -> Option<Self> {
        (minute < 60).then(|| QuarterHour((minute / 15) as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Position of the row in the input slice.
    pub index: usize,
    pub error: RowError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub readings: Vec<AggregatedReading>,
    pub skipped: Vec<SkippedRow>,
}

struct Run {
    quarter: QuarterHour,
    time_label: String,
    values: Vec<f64>,
}

impl Run {
    fn open(quarter: QuarterHour, time_label: String, value: f64) -> Self {
        Self {
            quarter,
            time_label,
            values: vec![value],
        }
    }

    fn close(&self, date: &str) -> AggregatedReading {
        let sum: f64 = self.values.iter().sum();
        AggregatedReading {
            date: date.to_string(),
            time_label: self.time_label.clone(),
            mean_level: Level::from_mean(sum / self.values.len() as f64),
        }
    }
}

pub fn aggregate(rows: &[RawReading]) -> Aggregation {
    let mut readings = Vec::new();
    let mut skipped = Vec::new();
    let mut run: Option<Run> = None;

    for (index, row) in rows.iter().enumerate() {
        let (quarter, time_label, value) = match parse_row(row) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!("skipping row {index}: {error}");
                skipped.push(SkippedRow { index, error });
                continue;
            }
        };

        match run.as_mut() {
            Some(current) if current.quarter == quarter => current.values.push(value),
            Some(current) => {
                readings.push(current.close(&row.date));
                *current = Run::open(quarter, time_label, value);
            }
            None => run = Some(Run::open(quarter, time_label, value)),
        }
    }

    if let Some(current) = run
        && let Some(last) = rows.last()
    {
        readings.push(current.close(&last.date));
    }

    Aggregation { readings, skipped }
}

fn parse_row(row: &RawReading) -> Result<(QuarterHour, String, f64), RowError> {
    let (quarter, time_label) = parse_time_of_day(&row.time_of_day)?;
    let value = parse_level(&row.level)?;
    Ok((quarter, time_label, value))
}

/// Returns the quarter of the hour and the `HH:MM` label for a `H:MM[:SS]` string.
pub fn parse_time_of_day(raw: &str) -> Result<(QuarterHour, String), RowError> {
    let malformed = || RowError::MalformedTimestamp(raw.to_string());

    let mut parts = raw.split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let (hour, minute) = (hour.trim(), minute.trim());

    let quarter = minute
        .parse::<u32>()
        .ok()
        .and_then(QuarterHour::from_minute)
        .ok_or_else(malformed)?;

    Ok((quarter, format!("{hour:0>2}:{minute:0>2}")))
}

/// Parses a comma-decimal reading such as `"52,3"`.
pub fn parse_level(raw: &str) -> Result<f64, RowError> {
    let normalized = raw.trim().replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::MalformedReading(raw.to_string())),
    }
}
