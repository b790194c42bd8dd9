//! Loader for humen charts.
//!
//! A humen is a text file. It starts with a header of `KEY:VALUE` lines, which ends at a line
//! whose key is `#START`. Every following line is one row of four beats. A row is split by commas
//! into one field per lane. A field divides the row into as many equal parts as it has characters.
//! Each digit from `1` to `9` is a note at its part of the row.
//!
//! ```text
//! BPM:120
//! OFFSET:0.05
//! #START
//! 1000,0010
//! 10101010,0
//! ```

#![warn(missing_docs)]

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num::ParseFloatError,
    path::{Path, PathBuf},
};

use hayashi_core::{
    chart::{Chart, ChartMetadata, Lane},
    timing::TimestampDifference,
};
use thiserror::Error;
use tracing::debug;

/// Key of the line ending the header.
pub const START_MARKER: &str = "#START";

/// An error that can occur while loading a humen.
#[derive(Debug, Error)]
pub enum Error {
    /// The file couldn't be opened.
    #[error("error opening {path:?}")]
    Open {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Reading failed, or the chart is not valid UTF-8.
    #[error("error reading chart")]
    Io(#[from] io::Error),
    /// A recognized header key is missing its `:VALUE` part.
    #[error("line {line}: {key} has no value")]
    MissingValue {
        /// The header key.
        key: &'static str,
        /// One-based line number.
        line: usize,
    },
    /// A recognized header value is not a number.
    #[error("line {line}: invalid {key} value {value:?}")]
    InvalidNumber {
        /// The header key.
        key: &'static str,
        /// The value as it appears in the chart.
        value: String,
        /// One-based line number.
        line: usize,
        /// Underlying error.
        #[source]
        source: ParseFloatError,
    },
    /// The BPM is zero, negative or not finite.
    #[error("BPM must be positive, got {bpm}")]
    NonPositiveBpm {
        /// The BPM from the header.
        bpm: f64,
    },
}

/// Reads a humen from a buffered IO stream.
pub fn from_reader<R: BufRead>(reader: R) -> Result<Chart, Error> {
    let mut lines = reader.lines().enumerate();

    let mut metadata = ChartMetadata::default();
    for (index, line) in &mut lines {
        let line = line?;
        let line_number = index + 1;

        let mut fields = line.split(':');
        // split() always yields at least one item.
        let key = fields.next().unwrap_or_default();
        match key {
            START_MARKER => break,
            "BPM" => metadata.bpm = parse_value("BPM", fields.next(), line_number)?,
            "OFFSET" => {
                metadata.offset =
                    TimestampDifference(parse_value("OFFSET", fields.next(), line_number)?)
            }
            _ => debug!("ignoring header line {line_number}: {line:?}"),
        }
    }

    if !(metadata.bpm > 0. && metadata.bpm.is_finite()) {
        return Err(Error::NonPositiveBpm { bpm: metadata.bpm });
    }

    let mut lanes: Vec<Lane> = Vec::new();
    for (row, (_, line)) in lines.enumerate() {
        let line = line?;

        for (column, field) in line.split(',').enumerate() {
            if lanes.len() <= column {
                lanes.resize_with(column + 1, Lane::new);
            }

            let subdivision = field.chars().count();
            for (index, c) in field.chars().enumerate() {
                if matches!(c, '1'..='9') {
                    lanes[column]
                        .timestamps
                        .push(metadata.timestamp(row, index, subdivision));
                }
            }
        }
    }

    let chart = Chart { metadata, lanes };
    debug!(
        bpm = chart.metadata.bpm,
        offset = chart.metadata.offset.as_secs(),
        lanes = chart.lane_count(),
        notes = chart.note_count(),
        "loaded humen"
    );

    Ok(chart)
}

/// Reads a humen from a string.
pub fn from_str(source: &str) -> Result<Chart, Error> {
    from_reader(source.as_bytes())
}

/// Reads a humen from a file.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Chart, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;

    from_reader(BufReader::new(file))
}

fn parse_value(key: &'static str, value: Option<&str>, line: usize) -> Result<f64, Error> {
    let value = value.ok_or(Error::MissingValue { key, line })?.trim();

    value.parse().map_err(|source| Error::InvalidNumber {
        key,
        value: value.to_owned(),
        line,
        source,
    })
}
