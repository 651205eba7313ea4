//! Delimited-text loader for passenger survey rows.
//!
//! The source has one header line followed by data lines. Fields are never
//! quoted, so the delimiter always splits. Rows with too few columns are
//! skipped; every other field failure is replaced by the column default.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::LoadError;
use crate::record::{PassengerRecord, SERVICE_COUNT};
use crate::stats::LoadStats;

/// Columns from `id` through `satisfaction`.
const REQUIRED_FIELDS: usize = 10 + SERVICE_COUNT;

/// Source layout options.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    delimiter: u8,
    has_row_index: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderOptions {
    /// Comma delimiter, leading row-index column.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_row_index: true,
        }
    }

    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Whether column 0 is an ordinal row index preceding `id`.
    pub fn has_row_index(mut self, yes: bool) -> Self {
        self.has_row_index = yes;
        self
    }

    /// Fewest columns a data row may have.
    pub fn min_columns(&self) -> usize {
        REQUIRED_FIELDS + self.offset()
    }

    fn offset(&self) -> usize {
        usize::from(self.has_row_index)
    }
}

/// Why a data row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewColumns { found: usize },
    Undecodable,
}

/// Loads the file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::SourceUnreadable`] if the file cannot be opened and
/// [`LoadError::Read`] if reading fails part-way. A readable file with no
/// valid rows yields an empty [`Dataset`].
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(
    path: impl AsRef<Path>,
    options: &LoaderOptions,
) -> Result<(Dataset, LoadStats), LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, options)
}

/// Loads from any reader. The first line is always treated as the header.
pub fn load_from_reader<R: Read>(
    reader: R,
    options: &LoaderOptions,
) -> Result<(Dataset, LoadStats), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut stats = LoadStats::new();
    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let fallback_line = i as u64 + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                return Err(LoadError::Read { line, source: e });
            }
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                debug!(line, reason = ?SkipReason::Undecodable, error = %e, "Skipping row");
                stats.record_skipped();
                continue;
            }
        };

        let line = row.position().map_or(fallback_line, |p| p.line());
        match parse_row(&row, options) {
            Ok((record, defaulted)) => {
                if defaulted > 0 {
                    debug!(line, defaulted, "Row had fields replaced by defaults");
                }
                stats.record_parsed(defaulted);
                records.push(record);
            }
            Err(reason) => {
                debug!(line, ?reason, "Skipping row");
                stats.record_skipped();
            }
        }
    }

    if stats.rows_skipped > 0 {
        warn!(
            rows_skipped = stats.rows_skipped,
            skip_pct = stats.skip_pct(),
            "Some rows were malformed and skipped"
        );
    }
    info!(
        rows_seen = stats.rows_seen,
        rows_parsed = stats.rows_parsed,
        fields_defaulted = stats.fields_defaulted,
        "Loaded {} records",
        stats.rows_parsed
    );

    Ok((Dataset::from(records), stats))
}

/// Coerces one split row into a record, counting defaulted fields.
fn parse_row(
    row: &StringRecord,
    options: &LoaderOptions,
) -> Result<(PassengerRecord, usize), SkipReason> {
    if row.len() < options.min_columns() {
        return Err(SkipReason::TooFewColumns { found: row.len() });
    }

    let o = options.offset();
    let mut fields = Fields { row, defaulted: 0 };

    let mut ratings = [0u32; SERVICE_COUNT];
    for (i, slot) in ratings.iter_mut().enumerate() {
        *slot = fields.number(o + 7 + i);
    }

    let record = PassengerRecord {
        row_index: if options.has_row_index {
            row.get(0).and_then(|s| s.parse().ok())
        } else {
            None
        },
        id: fields.text(o),
        gender: fields.text(o + 1),
        customer_type: fields.text(o + 2),
        age: fields.number(o + 3),
        type_of_travel: fields.text(o + 4),
        travel_class: fields.text(o + 5),
        flight_distance: fields.number(o + 6),
        ratings,
        departure_delay_minutes: fields.minutes(o + 7 + SERVICE_COUNT),
        arrival_delay_minutes: fields.minutes(o + 8 + SERVICE_COUNT),
        satisfaction: fields.text(o + 9 + SERVICE_COUNT),
        flight_date: row
            .get(o + REQUIRED_FIELDS)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    Ok((record, fields.defaulted))
}

/// Per-column coercion with default substitution.
struct Fields<'r> {
    row: &'r StringRecord,
    defaulted: usize,
}

impl<'r> Fields<'r> {
    fn raw(&self, idx: usize) -> &'r str {
        self.row.get(idx).unwrap_or("")
    }

    fn text(&self, idx: usize) -> String {
        self.raw(idx).to_string()
    }

    fn number<T: FromStr + Default>(&mut self, idx: usize) -> T {
        match self.raw(idx).parse() {
            Ok(v) => v,
            Err(_) => {
                self.defaulted += 1;
                T::default()
            }
        }
    }

    /// Delay in minutes; empty, unparsable or non-finite becomes `0.0`.
    fn minutes(&mut self, idx: usize) -> f64 {
        match self.raw(idx).parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.defaulted += 1;
                0.0
            }
        }
    }
}
