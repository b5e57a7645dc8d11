use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use crate::{error::ExportError, noise::RawReading};

pub const DATE_COLUMN: &str = "Datum";
pub const TIME_COLUMN: &str = "Systemzeit";
pub const LEVEL_COLUMN: &str = "LAS";

const DELIMITER: u8 = b';';

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Drop the first data row after the header. The meter writes a partial
    /// measurement there, so it is discarded by default.
    pub skip_first_row: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_first_row: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    date: usize,
    time: usize,
    level: usize,
}

impl ColumnLayout {
    fn from_header(header: &ByteRecord) -> Result<Self, ExportError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|field| String::from_utf8_lossy(field).trim() == name)
                .ok_or(ExportError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            time: find(TIME_COLUMN)?,
            level: find(LEVEL_COLUMN)?,
        })
    }

    fn reading(&self, record: &ByteRecord) -> RawReading {
        let field = |index: usize| {
            record
                .get(index)
                .map(|v| String::from_utf8_lossy(v).into_owned())
                .unwrap_or_default()
        };

        RawReading {
            date: field(self.date),
            time_of_day: field(self.time),
            level: field(self.level),
        }
    }
}

/// Reads a semicolon-delimited meter export into raw rows, in file order.
///
/// Columns are matched by trimmed header name, so `"Systemzeit "` is accepted.
/// Rows shorter than the header yield empty fields instead of failing.
pub fn read_readings<R: Read>(
    reader: R,
    options: &ReadOptions,
) -> Result<Vec<RawReading>, ExportError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(reader);

    let layout = ColumnLayout::from_header(reader.byte_headers()?)?;

    let mut readings = Vec::new();
    for record in reader.byte_records() {
        readings.push(layout.reading(&record?));
    }

    if options.skip_first_row && !readings.is_empty() {
        readings.remove(0);
    }

    Ok(readings)
}
