use std::path::Path;

use crate::error::EndemicityError;
use crate::models::PresenceMatrix;

/// Read a presence matrix from a JSON file.
///
/// The grid shape is checked on deserialization. An unnamed matrix takes
/// the file stem as its name.
pub fn read_json(path: impl AsRef<Path>) -> Result<PresenceMatrix, EndemicityError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let matrix: PresenceMatrix = serde_json::from_str(&content)?;
    if matrix.name().is_empty() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        return Ok(matrix.with_name(stem));
    }
    Ok(matrix)
}

/// Read a presence matrix from JSON bytes.
pub fn read_json_from_bytes(data: &[u8], name: &str) -> Result<PresenceMatrix, EndemicityError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| EndemicityError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let matrix: PresenceMatrix = serde_json::from_str(content)?;
    Ok(matrix.with_name(name))
}

/// Write a presence matrix to a JSON file.
pub fn write_json(
    matrix: &PresenceMatrix,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), EndemicityError> {
    let content = if pretty {
        serde_json::to_string_pretty(matrix)?
    } else {
        serde_json::to_string(matrix)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
