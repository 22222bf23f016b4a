use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchRecord, Outcome, RecordStore};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Any of these aborts the whole load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("reading parquet record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("dataset contains no records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Column naming
// ---------------------------------------------------------------------------

/// Required source columns. Each accepts the launch export's
/// header as well as a snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Site,
    PayloadMass,
    Outcome,
    BoosterCategory,
}

impl Column {
    const ALL: [Column; 4] = [
        Column::Site,
        Column::PayloadMass,
        Column::Outcome,
        Column::BoosterCategory,
    ];

    fn names(self) -> [&'static str; 2] {
        match self {
            Column::Site => ["site", "Launch Site"],
            Column::PayloadMass => ["payload_mass_kg", "Payload Mass (kg)"],
            Column::Outcome => ["outcome", "class"],
            Column::BoosterCategory => ["booster_category", "Booster Version Category"],
        }
    }

    fn canonical(self) -> &'static str {
        self.names()[0]
    }

    fn matches(self, header: &str) -> bool {
        self.names().contains(&header)
    }
}

/// Row shape shared by the CSV and JSON readers.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "Launch Site")]
    site: String,
    #[serde(alias = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(alias = "class")]
    outcome: f64,
    #[serde(alias = "Booster Version Category")]
    booster_category: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<LaunchRecord, LoadError> {
        validate_record(
            row,
            self.site,
            self.payload_mass_kg,
            self.outcome,
            self.booster_category,
        )
    }
}

fn invalid(row: usize, column: Column, reason: impl Into<String>) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.canonical(),
        reason: reason.into(),
    }
}

fn validate_record(
    row: usize,
    site: String,
    payload_mass_kg: f64,
    outcome_flag: f64,
    booster_category: String,
) -> Result<LaunchRecord, LoadError> {
    if site.trim().is_empty() {
        return Err(invalid(row, Column::Site, "empty launch site"));
    }
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(invalid(
            row,
            Column::PayloadMass,
            format!("{payload_mass_kg} is not a non-negative mass"),
        ));
    }
    let outcome = Outcome::from_flag(outcome_flag).ok_or_else(|| {
        invalid(
            row,
            Column::Outcome,
            format!("expected 0 or 1, got {outcome_flag}"),
        )
    })?;
    Ok(LaunchRecord::new(site, payload_mass_kg, outcome, booster_category))
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch record table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> Result<RecordStore, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(open(path)?),
        "json" => load_json(open(path)?),
        "parquet" | "pq" => load_parquet(open(path)?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV rows. Columns other than the four required ones are ignored,
/// so the full launch export (flight number, date, mission outcome, …)
/// loads as-is.
pub fn load_csv<R: Read>(source: R) -> Result<RecordStore, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in Column::ALL {
        if !headers.iter().any(|h| column.matches(h)) {
            return Err(LoadError::MissingColumn(column.canonical()));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        records.push(result?.into_record(row)?);
    }

    RecordStore::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "class": 1, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
pub fn load_json<R: Read>(source: R) -> Result<RecordStore, LoadError> {
    let raw: Vec<RawRecord> = serde_json::from_reader(source)?;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row, rec)| rec.into_record(row))
        .collect::<Result<Vec<_>, _>>()?;
    RecordStore::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from Parquet. String columns may be Utf8 or
/// LargeUtf8, the payload any numeric type, and the outcome a numeric or
/// boolean column.
pub fn load_parquet(file: File) -> Result<RecordStore, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Checked up front so a file without row groups still reports it.
    let schema = builder.schema();
    for column in Column::ALL {
        if !column.names().iter().any(|name| schema.index_of(name).is_ok()) {
            return Err(LoadError::MissingColumn(column.canonical()));
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        // Row numbers in errors count across batches.
        let first = records.len();

        let site = batch_column(&batch, Column::Site)?;
        let payload = batch_column(&batch, Column::PayloadMass)?;
        let payload = float_column(payload, first, Column::PayloadMass)?;
        let outcome = batch_column(&batch, Column::Outcome)?;
        let outcome = float_column(outcome, first, Column::Outcome)?;
        let booster = batch_column(&batch, Column::BoosterCategory)?;

        for row in 0..batch.num_rows() {
            let index = first + row;
            let record = validate_record(
                index,
                string_value(site, row, index, Column::Site)?,
                float_value(&payload, row, index, Column::PayloadMass)?,
                float_value(&outcome, row, index, Column::Outcome)?,
                string_value(booster, row, index, Column::BoosterCategory)?,
            )?;
            records.push(record);
        }
    }

    RecordStore::from_records(records)
}

// -- Parquet / Arrow helpers --

fn batch_column(batch: &RecordBatch, column: Column) -> Result<&ArrayRef, LoadError> {
    let schema = batch.schema();
    column
        .names()
        .iter()
        .find_map(|name| schema.index_of(name).ok())
        .map(|idx| batch.column(idx))
        .ok_or(LoadError::MissingColumn(column.canonical()))
}

fn string_value(
    col: &ArrayRef,
    row: usize,
    index: usize,
    column: Column,
) -> Result<String, LoadError> {
    if col.is_null(row) {
        return Err(invalid(index, column, "null value"));
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(invalid(
            index,
            column,
            format!("expected a string column, got {other:?}"),
        )),
    }
}

/// Cast a numeric or boolean column to Float64 once per batch.
fn float_column(
    col: &ArrayRef,
    first: usize,
    column: Column,
) -> Result<Float64Array, LoadError> {
    let data_type = col.data_type();
    if !data_type.is_numeric() && data_type != &DataType::Boolean {
        return Err(invalid(
            first,
            column,
            format!("expected a numeric column, got {data_type:?}"),
        ));
    }
    let cast = arrow::compute::cast(col, &DataType::Float64)?;
    Ok(cast.as_primitive::<Float64Type>().clone())
}

fn float_value(
    col: &Float64Array,
    row: usize,
    index: usize,
    column: Column,
) -> Result<f64, LoadError> {
    if col.is_null(row) {
        return Err(invalid(index, column, "null value"));
    }
    Ok(col.value(row))
}
