mod delimited;
mod format;
mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::core::SimulationResult;
use crate::error::ExportError;

pub use delimited::{to_csv_string, write_csv};
pub use format::format_currency;
pub use spreadsheet::to_xlsx_bytes;

pub const HEADERS: [&str; 2] = ["Año", "Saldo Acumulado"];
pub const CSV_FILE_NAME: &str = "simulacion_pension.csv";
pub const XLSX_FILE_NAME: &str = "simulacion_pension.xlsx";
pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Writes both export documents into `dir` under their fixed file names.
pub fn write_exports(
    result: &SimulationResult,
    dir: &Path,
) -> Result<(PathBuf, PathBuf), ExportError> {
    fs::create_dir_all(dir)?;
    let csv_path = dir.join(CSV_FILE_NAME);
    let xlsx_path = dir.join(XLSX_FILE_NAME);
    write_csv_file(result, &csv_path)?;
    write_xlsx_file(result, &xlsx_path)?;
    Ok((csv_path, xlsx_path))
}

pub fn write_csv_file(result: &SimulationResult, path: &Path) -> Result<(), ExportError> {
    let file = fs::File::create(path)?;
    write_csv(result, file)?;
    info!("wrote {} yearly rows to {}", result.years.len(), path.display());
    Ok(())
}

pub fn write_xlsx_file(result: &SimulationResult, path: &Path) -> Result<(), ExportError> {
    fs::write(path, to_xlsx_bytes(result)?)?;
    info!("wrote {} yearly rows to {}", result.years.len(), path.display());
    Ok(())
}
