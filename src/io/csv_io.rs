use std::io::Read;
use std::path::Path;

use crate::error::EndemicityError;
use crate::models::{CellState, PresenceMatrix};

/// Interpret one delimited-text cell.
///
/// Configured missing symbols win over the built-in vocabulary, so a data
/// set can mark unknowns with e.g. `N` or `NA`.
pub fn parse_cell(raw: &str, missing_symbols: &[String]) -> Result<CellState, EndemicityError> {
    let raw = raw.trim();
    if missing_symbols.iter().any(|m| m == raw) {
        return Ok(CellState::Missing);
    }
    raw.parse()
}

/// Turn a header row plus `label, cell, cell, ...` rows into a matrix.
pub(crate) fn rows_to_matrix<I>(
    header: Vec<String>,
    rows: I,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let taxon_labels: Vec<String> = header.into_iter().skip(1).collect();
    let mut area_labels = Vec::new();
    let mut cells = Vec::new();

    for (row_index, record) in rows.into_iter().enumerate() {
        let mut fields = record.into_iter();
        let Some(label) = fields.next() else {
            continue;
        };
        let row = fields
            .enumerate()
            .map(|(col, raw)| {
                parse_cell(&raw, missing_symbols).map_err(|e| {
                    EndemicityError::ParseError(format!(
                        "area '{label}' (row {}), taxon column {}: {e}",
                        row_index + 2,
                        col + 2
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        area_labels.push(label);
        cells.push(row);
    }

    PresenceMatrix::new(area_labels, taxon_labels, cells)
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError> {
    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    rows_to_matrix(header, rows, missing_symbols)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

/// Read a presence matrix from a CSV file.
///
/// Layout: a header row `area,<taxon labels...>`, then one row per area.
pub fn read_csv(
    path: impl AsRef<Path>,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    let matrix = parse_csv_records(&mut rdr, missing_symbols)?;

    Ok(matrix.with_name(
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
    ))
}

/// Read a presence matrix from CSV bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    missing_symbols: &[String],
) -> Result<PresenceMatrix, EndemicityError> {
    let mut rdr = reader_builder().from_reader(data);
    Ok(parse_csv_records(&mut rdr, missing_symbols)?.with_name(name))
}

/// Write a presence matrix to a CSV file.
pub fn write_csv(matrix: &PresenceMatrix, path: impl AsRef<Path>) -> Result<(), EndemicityError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;

    let mut header = vec!["area"];
    header.extend(matrix.taxon_labels().iter().map(String::as_str));
    wtr.write_record(&header)?;

    for area in matrix.areas() {
        let mut record = vec![area.label];
        record.extend(matrix.row(area.index).iter().map(|c| c.symbol()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
