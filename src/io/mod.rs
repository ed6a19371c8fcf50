mod csv_io;
mod excel_io;
mod json_io;
mod nexus_io;

use std::path::Path;

use tracing::info;

use crate::config::InputConfig;
use crate::error::EndemicityError;
use crate::models::PresenceMatrix;

pub use csv_io::{parse_cell, read_csv, read_csv_from_bytes, write_csv};
pub use excel_io::{read_excel, read_excel_from_bytes, write_excel};
pub use json_io::{read_json, read_json_from_bytes, write_json};
pub use nexus_io::{read_nexus, read_nexus_from_bytes, read_nexus_from_str};

/// Trait for reading a presence matrix from a file.
pub trait MatrixReader {
    fn read(&self, path: &Path) -> Result<PresenceMatrix, EndemicityError>;
}

/// Trait for writing a presence matrix to a file.
pub trait MatrixWriter {
    fn write(&self, matrix: &PresenceMatrix, path: &Path) -> Result<(), EndemicityError>;
}

/// NEXUS format reader.
pub struct NexusFormat;

impl MatrixReader for NexusFormat {
    fn read(&self, path: &Path) -> Result<PresenceMatrix, EndemicityError> {
        read_nexus(path)
    }
}

/// CSV format reader/writer.
pub struct CsvFormat {
    pub missing_symbols: Vec<String>,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            missing_symbols: InputConfig::default().missing_symbols,
        }
    }
}

impl MatrixReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<PresenceMatrix, EndemicityError> {
        read_csv(path, &self.missing_symbols)
    }
}

impl MatrixWriter for CsvFormat {
    fn write(&self, matrix: &PresenceMatrix, path: &Path) -> Result<(), EndemicityError> {
        write_csv(matrix, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl MatrixReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<PresenceMatrix, EndemicityError> {
        read_json(path)
    }
}

impl MatrixWriter for JsonFormat {
    fn write(&self, matrix: &PresenceMatrix, path: &Path) -> Result<(), EndemicityError> {
        write_json(matrix, path, self.pretty)
    }
}

/// Excel (.xlsx) format reader/writer.
pub struct ExcelFormat {
    pub missing_symbols: Vec<String>,
}

impl Default for ExcelFormat {
    fn default() -> Self {
        Self {
            missing_symbols: InputConfig::default().missing_symbols,
        }
    }
}

impl MatrixReader for ExcelFormat {
    fn read(&self, path: &Path) -> Result<PresenceMatrix, EndemicityError> {
        read_excel(path, &self.missing_symbols)
    }
}

impl MatrixWriter for ExcelFormat {
    fn write(&self, matrix: &PresenceMatrix, path: &Path) -> Result<(), EndemicityError> {
        write_excel(matrix, path)
    }
}

/// File formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    Nexus,
    Csv,
    Json,
    Excel,
}

impl MatrixFormat {
    pub fn from_path(path: &Path) -> Result<Self, EndemicityError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "nex" | "nexus" | "nxs" => Ok(MatrixFormat::Nexus),
            "csv" => Ok(MatrixFormat::Csv),
            "json" => Ok(MatrixFormat::Json),
            "xlsx" => Ok(MatrixFormat::Excel),
            _ => Err(EndemicityError::UnsupportedFormat(format!(
                ".{ext} (use .nex, .csv, .json or .xlsx)"
            ))),
        }
    }

    pub fn reader(self, input: &InputConfig) -> Box<dyn MatrixReader> {
        match self {
            MatrixFormat::Nexus => Box::new(NexusFormat),
            MatrixFormat::Csv => Box::new(CsvFormat {
                missing_symbols: input.missing_symbols.clone(),
            }),
            MatrixFormat::Json => Box::new(JsonFormat::default()),
            MatrixFormat::Excel => Box::new(ExcelFormat {
                missing_symbols: input.missing_symbols.clone(),
            }),
        }
    }

    /// Writer for this format, if it can be written.
    pub fn writer(self, pretty: bool) -> Option<Box<dyn MatrixWriter>> {
        match self {
            MatrixFormat::Nexus => None,
            MatrixFormat::Csv => Some(Box::new(CsvFormat::default())),
            MatrixFormat::Json => Some(Box::new(JsonFormat { pretty })),
            MatrixFormat::Excel => Some(Box::new(ExcelFormat::default())),
        }
    }
}

/// Load the matrix at `path` and drop the configured outgroup area.
pub fn load_matrix(path: &Path, input: &InputConfig) -> Result<PresenceMatrix, EndemicityError> {
    let format = MatrixFormat::from_path(path)?;
    let matrix = format.reader(input).read(path)?;
    info!(
        format = ?format,
        areas = matrix.area_count(),
        taxa = matrix.taxon_count(),
        "matrix loaded"
    );

    if input.outgroup > 0 {
        let label = matrix
            .area_labels()
            .get(input.outgroup - 1)
            .cloned()
            .unwrap_or_default();
        let trimmed = matrix.without_area(input.outgroup)?;
        info!("Excluded outgroup area {} ({label})", input.outgroup);
        return Ok(trimmed);
    }
    Ok(matrix)
}

/// Write `matrix` in the format implied by the extension of `path`.
pub fn save_matrix(
    matrix: &PresenceMatrix,
    path: &Path,
    pretty: bool,
) -> Result<(), EndemicityError> {
    let format = MatrixFormat::from_path(path)?;
    let writer = format.writer(pretty).ok_or_else(|| {
        EndemicityError::UnsupportedFormat(format!("{format:?} output is not supported"))
    })?;
    writer.write(matrix, path)
}
