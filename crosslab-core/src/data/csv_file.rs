//! CSV file data provider.
//!
//! Reads `date,close` rows for offline and deterministic runs. Dates are
//! ISO (`YYYY-MM-DD`); rows outside the requested range are dropped.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::PricePoint;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
}

/// Price series provider backed by a local CSV file.
///
/// The file stands in for one symbol; the symbol argument is carried
/// through to the result untouched.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            DataError::CsvImport(format!("cannot open {}: {e}", self.path.display()))
        })?;

        let mut prices = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| {
                DataError::CsvImport(format!("{} row {}: {e}", self.path.display(), line + 2))
            })?;
            if row.date >= start && row.date <= end {
                prices.push(PricePoint::new(row.date, row.close));
            }
        }

        if prices.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        tracing::info!(
            symbol,
            points = prices.len(),
            path = %self.path.display(),
            "loaded price series from csv"
        );

        Ok(FetchResult {
            symbol: symbol.to_string(),
            prices,
            source: DataSource::CsvImport,
        })
    }
}
