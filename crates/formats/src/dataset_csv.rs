//! Migration dataset CSV -> `DatasetRecord`s.
//!
//! The first row is the header; header names are trimmed. Recognized columns:
//! `code`, `code3`, `name`, `total_net_migration`, `percent_change`,
//! `migration_trend`, `population_2022`. Unknown columns are ignored, cells
//! that are empty or fail to parse as numbers are stored as absent, and rows
//! that cannot be read are skipped with a warning.

use std::io;

use csv::{ReaderBuilder, StringRecord, Trim};
use dataset::DatasetRecord;

pub const COL_CODE: &str = "code";
pub const COL_CODE3: &str = "code3";
pub const COL_NAME: &str = "name";
pub const COL_TOTAL_NET_MIGRATION: &str = "total_net_migration";
pub const COL_PERCENT_CHANGE: &str = "percent_change";
pub const COL_MIGRATION_TREND: &str = "migration_trend";
pub const COL_POPULATION: &str = "population_2022";

#[derive(Debug)]
pub enum DatasetLoadError {
    Csv(csv::Error),
    NoRecognizedColumns { headers: Vec<String> },
}

impl std::fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetLoadError::Csv(e) => write!(f, "CSV error: {e}"),
            DatasetLoadError::NoRecognizedColumns { headers } => {
                write!(f, "no recognized dataset columns in header {headers:?}")
            }
        }
    }
}

impl std::error::Error for DatasetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetLoadError::Csv(e) => Some(e),
            DatasetLoadError::NoRecognizedColumns { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    code: Option<usize>,
    code3: Option<usize>,
    name: Option<usize>,
    total_net_migration: Option<usize>,
    percent_change: Option<usize>,
    migration_trend: Option<usize>,
    population: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            code: find(COL_CODE),
            code3: find(COL_CODE3),
            name: find(COL_NAME),
            total_net_migration: find(COL_TOTAL_NET_MIGRATION),
            percent_change: find(COL_PERCENT_CHANGE),
            migration_trend: find(COL_MIGRATION_TREND),
            population: find(COL_POPULATION),
        }
    }

    fn any(&self) -> bool {
        [
            self.code,
            self.code3,
            self.name,
            self.total_net_migration,
            self.percent_change,
            self.migration_trend,
            self.population,
        ]
        .iter()
        .any(Option::is_some)
    }

    fn record(&self, row: &StringRecord) -> DatasetRecord {
        let text = |col: Option<usize>| cell(row, col).map(str::to_string);
        let number = |col: Option<usize>| cell(row, col).and_then(parse_number);
        DatasetRecord {
            iso_code2: text(self.code),
            iso_code3: text(self.code3),
            name: text(self.name),
            total_net_migration: number(self.total_net_migration),
            percent_change: number(self.percent_change),
            migration_trend: text(self.migration_trend),
            population: number(self.population),
        }
    }
}

pub fn records_from_csv_str(payload: &str) -> Result<Vec<DatasetRecord>, DatasetLoadError> {
    records_from_csv_reader(payload.as_bytes())
}

pub fn records_from_csv_reader<R: io::Read>(
    reader: R,
) -> Result<Vec<DatasetRecord>, DatasetLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(DatasetLoadError::Csv)?.clone();
    let columns = Columns::from_headers(&headers);
    if !columns.any() {
        return Err(DatasetLoadError::NoRecognizedColumns {
            headers: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (row_index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                skipped += 1;
                tracing::warn!(row = row_index + 1, error = %e, "skipping unreadable dataset row");
                continue;
            }
        };
        let record = columns.record(&row);
        if record == DatasetRecord::default() {
            continue;
        }
        out.push(record);
    }

    if skipped > 0 {
        tracing::warn!(skipped, "dataset rows skipped");
    }
    tracing::info!(records = out.len(), "loaded migration dataset");
    Ok(out)
}

fn cell(row: &StringRecord, col: Option<usize>) -> Option<&str> {
    row.get(col?).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}
