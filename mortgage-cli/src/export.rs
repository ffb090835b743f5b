//! CSV export of projection series.
//!
//! ## Monthly CSV
//!
//! One row per month of the loan. The first column is the 1-based `month`,
//! followed by one column per series, named after the series label with
//! spaces replaced by underscores. Amounts are rounded to cents.
//!
//! ```csv
//! month,balances,interest_paid,equity_earned,monthly_payment,...
//! 1,399519.38,1666.67,480.62,2147.29,...
//! ```
//!
//! ## Yearly CSV
//!
//! One row per loan year with every field of `ProjectionYear`, unrounded.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use mortgage_core::calculations::{ProjectionSeries, ProjectionYear};
use thiserror::Error;

use crate::presentation::format_amount;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes every monthly series as columns, one row per month.
pub fn write_monthly_csv<W: Write>(
    writer: W,
    series: &ProjectionSeries,
) -> Result<usize, ExportError> {
    let columns = series.entries();
    let months = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    let mut csv_writer = csv::Writer::from_writer(writer);
    let header = std::iter::once("month".to_string())
        .chain(columns.iter().map(|(label, _)| label.replace(' ', "_")));
    csv_writer.write_record(header)?;

    for month in 0..months {
        let row = std::iter::once((month + 1).to_string()).chain(
            columns
                .iter()
                .map(|(_, values)| values.get(month).map(|v| format_amount(*v)).unwrap_or_default()),
        );
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    Ok(months)
}

/// Writes the yearly rows with a header derived from the field names.
pub fn write_yearly_csv<W: Write>(
    writer: W,
    yearly: &[ProjectionYear],
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in yearly {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(yearly.len())
}

pub fn write_monthly_csv_file(
    path: &Path,
    series: &ProjectionSeries,
) -> Result<usize, ExportError> {
    write_monthly_csv(File::create(path)?, series)
}

pub fn write_yearly_csv_file(
    path: &Path,
    yearly: &[ProjectionYear],
) -> Result<usize, ExportError> {
    write_yearly_csv(File::create(path)?, yearly)
}
