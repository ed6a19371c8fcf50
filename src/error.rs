use thiserror::Error;

/// Errors that can occur while loading or analyzing a presence matrix.
#[derive(Error, Debug)]
pub enum EndemicityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("NEXUS error at line {line}, column {column}: {message}")]
    Nexus {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid matrix shape: expected {expected} {axis}, got {actual}")]
    InvalidMatrixShape {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Outgroup {outgroup} is out of range (matrix has {areas} areas)")]
    OutgroupOutOfRange { outgroup: usize, areas: usize },
}

impl From<calamine::Error> for EndemicityError {
    fn from(e: calamine::Error) -> Self {
        EndemicityError::Excel(e.to_string())
    }
}

impl From<calamine::XlsxError> for EndemicityError {
    fn from(e: calamine::XlsxError) -> Self {
        EndemicityError::Excel(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for EndemicityError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        EndemicityError::Excel(e.to_string())
    }
}
