use rust_xlsxwriter::{Format, Workbook};

use super::HEADERS;
use crate::core::SimulationResult;
use crate::error::ExportError;

pub fn to_xlsx_bytes(result: &SimulationResult) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (index, record) in result.years.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_number(row, 0, f64::from(record.year))?;
        worksheet.write_number(row, 1, record.accumulated_balance)?;
    }

    Ok(workbook.save_to_buffer()?)
}
