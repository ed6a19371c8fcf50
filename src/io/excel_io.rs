use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use super::csv_io::rows_to_matrix;
use crate::error::EndemicityError;
use crate::models::{CellState, PresenceMatrix};

fn cell_text(cell: &Data) -> String {
    match cell.get_float() {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        _ => cell.to_string(),
    }
}

/// Read a presence matrix from the first worksheet of an Excel (.xlsx) file.
///
/// Same layout as CSV: a header row `area, <taxon labels...>`, then one
/// row per area with `1`/`0` cells and the configured missing symbols.
pub fn read_excel(
    path: impl AsRef<Path>,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| EndemicityError::Excel("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().unwrap_or_default();
    // trailing empty header cells come from formatting, not data
    let width = header.iter().rposition(|h| !h.is_empty()).map_or(0, |i| i + 1);
    let header: Vec<String> = header.into_iter().take(width).collect();
    let body = rows
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .map(|mut r| {
            r.resize(width, String::new());
            r
        });

    let matrix = rows_to_matrix(header, body, missing_symbols)?;
    Ok(matrix.with_name(
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
    ))
}

/// Read a presence matrix from Excel bytes.
pub fn read_excel_from_bytes(
    data: &[u8],
    name: &str,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError> {
    use std::io::Write;
    let mut tmp = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(read_excel(tmp.path(), missing_symbols)?.with_name(name))
}

/// Write a presence matrix to an Excel (.xlsx) file.
pub fn write_excel(matrix: &PresenceMatrix, path: impl AsRef<Path>) -> Result<(), EndemicityError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "area")?;
    for (col, label) in matrix.taxon_labels().iter().enumerate() {
        worksheet.write_string(0, (col + 1) as u16, label)?;
    }

    for area in matrix.areas() {
        let row = (area.index + 1) as u32;
        worksheet.write_string(row, 0, area.label)?;
        for (col, state) in matrix.row(area.index).iter().enumerate() {
            let col = (col + 1) as u16;
            match state {
                CellState::Present => worksheet.write_number(row, col, 1.0)?,
                CellState::Absent => worksheet.write_number(row, col, 0.0)?,
                CellState::Missing => worksheet.write_string(row, col, state.symbol())?,
            };
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}
