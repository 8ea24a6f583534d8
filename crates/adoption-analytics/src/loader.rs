//! Delimited procedure file loading

use crate::record::{ProcedureRecord, ProcedureTable};
use adoption_common::{AdoptionError, DeviceId, PhysicianId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, trace, warn};

/// Date-only layouts accepted for `Procedure_Date`, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Errors raised while loading a procedure file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed procedure data at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Procedure data contains no rows with a valid procedure date")]
    Empty,

    #[error("Failed to read procedure data: {0}")]
    Io(#[from] io::Error),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Parse { line, message },
        }
    }
}

impl From<LoadError> for AdoptionError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound { path } => AdoptionError::data_not_found(path),
            other => AdoptionError::data_load_with_source(other.to_string(), other),
        }
    }
}

/// Parsing options for procedure files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Row shape as it appears in the file; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawProcedure {
    #[serde(rename = "Physician_ID")]
    physician_id: String,
    #[serde(rename = "Device_ID")]
    device_id: String,
    #[serde(rename = "Procedure_Date")]
    procedure_date: String,
    #[serde(rename = "Geographic_Region")]
    region: String,
    #[serde(rename = "Specialty")]
    specialty: String,
    /// Blank cells deserialize to `None`
    #[serde(rename = "Revenue_Impact")]
    revenue_impact: Option<f64>,
}

impl RawProcedure {
    fn into_record(self, procedure_date: NaiveDate) -> ProcedureRecord {
        ProcedureRecord {
            physician_id: PhysicianId::new(self.physician_id),
            device_id: DeviceId::new(self.device_id),
            procedure_date,
            region: self.region,
            specialty: self.specialty,
            revenue_impact: self.revenue_impact,
        }
    }
}

/// Load a procedure file from disk.
#[instrument(skip(options), fields(path = %path.as_ref().display()))]
pub fn load_procedures<P: AsRef<Path>>(
    path: P,
    options: &LoaderOptions,
) -> Result<ProcedureTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;
    debug!("Opened procedure file");

    parse_procedures(file, options)
}

/// Parse procedure rows from any reader.
///
/// Rows whose procedure date cannot be parsed are dropped and counted;
/// any other malformed row fails the whole load.
pub fn parse_procedures<R: Read>(
    reader: R,
    options: &LoaderOptions,
) -> Result<ProcedureTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut row = csv::StringRecord::new();
    let mut records = Vec::new();
    let mut dropped = 0usize;

    while csv_reader.read_record(&mut row)? {
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawProcedure = row
            .deserialize(Some(&headers))
            .map_err(|e| LoadError::Parse {
                line,
                message: e.to_string(),
            })?;

        if let Some(revenue) = raw.revenue_impact.filter(|value| !value.is_finite()) {
            return Err(LoadError::Parse {
                line,
                message: format!("Revenue_Impact must be a finite number, got {revenue}"),
            });
        }

        match parse_procedure_date(&raw.procedure_date) {
            Some(date) => records.push(raw.into_record(date)),
            None => {
                trace!(line, value = %raw.procedure_date, "Unparseable procedure date");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped rows with unparseable procedure dates");
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    info!(rows = records.len(), dropped, "Loaded procedure records");
    Ok(ProcedureTable::new(records, dropped))
}

/// Parse a procedure date, keeping only the calendar date of time stamps.
pub fn parse_procedure_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
