use std::io::{self, Write};

use super::HEADERS;
use crate::core::SimulationResult;
use crate::error::ExportError;

/// One row per simulated year, no index column. Balances always carry a decimal point
/// (`164000.0`).
pub fn write_csv<W: Write>(result: &SimulationResult, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for record in &result.years {
        csv.write_record([
            record.year.to_string(),
            format!("{:?}", record.accumulated_balance),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv_string(result: &SimulationResult) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
