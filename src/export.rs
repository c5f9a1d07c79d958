//! CSV export of embedded readings, with the same columns as the server's spreadsheets.

use std::io::Write;

use crate::chart::sorted_readings;
use crate::error::AppResult;
use crate::models::Reading;

pub const HEADERS: [&str; 7] = [
    "timestamp",
    "avg_temp",
    "avg_hum",
    "min_temp",
    "max_temp",
    "min_hum",
    "max_hum",
];

/// Write `readings` in chronological order. Raw readings fill the average
/// columns from their plain values; missing values are left empty.
///
/// # Errors
///
/// Returns `AppError::Csv` if writing fails.
pub fn write_readings_csv<W: Write>(writer: W, readings: &[Reading]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for r in sorted_readings(readings) {
        let cell = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
        wtr.write_record([
            r.timestamp.clone(),
            cell(r.avg_temp.or(r.temperature)),
            cell(r.avg_hum.or(r.humidity)),
            cell(r.min_temp),
            cell(r.max_temp),
            cell(r.min_hum),
            cell(r.max_hum),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
