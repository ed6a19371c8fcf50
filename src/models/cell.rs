use serde::{Deserialize, Serialize};

/// Observation recorded for one (area, taxon) pair of the matrix.
///
/// Only `Present` contributes to any count. `Absent` and `Missing` are
/// treated identically by every statistic; the distinction survives only
/// so that loaders and writers can round-trip the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Present,
    Absent,
    Missing,
}

impl CellState {
    /// Whether this cell counts as an occurrence.
    pub fn is_present(self) -> bool {
        self == CellState::Present
    }

    /// Symbol used when writing delimited formats.
    pub fn symbol(self) -> &'static str {
        match self {
            CellState::Present => "1",
            CellState::Absent => "0",
            CellState::Missing => "?",
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellState::Present => write!(f, "Present"),
            CellState::Absent => write!(f, "Absent"),
            CellState::Missing => write!(f, "Missing"),
        }
    }
}

impl std::str::FromStr for CellState {
    type Err = crate::error::EndemicityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "present" | "p" => Ok(CellState::Present),
            "0" | "absent" | "a" => Ok(CellState::Absent),
            "?" | "-" | "" | "missing" | "m" => Ok(CellState::Missing),
            _ => Err(crate::error::EndemicityError::ParseError(format!(
                "Unknown cell state: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_present_counts() {
        assert!(CellState::Present.is_present());
        assert!(!CellState::Absent.is_present());
        assert!(!CellState::Missing.is_present());
    }

    #[test]
    fn test_cell_state_display() {
        assert_eq!(CellState::Present.to_string(), "Present");
        assert_eq!(CellState::Absent.to_string(), "Absent");
        assert_eq!(CellState::Missing.to_string(), "Missing");
    }

    #[test]
    fn test_cell_state_parse_symbols() {
        assert_eq!("1".parse::<CellState>().unwrap(), CellState::Present);
        assert_eq!("0".parse::<CellState>().unwrap(), CellState::Absent);
        assert_eq!("?".parse::<CellState>().unwrap(), CellState::Missing);
        assert_eq!("-".parse::<CellState>().unwrap(), CellState::Missing);
        assert_eq!("".parse::<CellState>().unwrap(), CellState::Missing);
    }

    #[test]
    fn test_cell_state_parse_words_case_insensitive() {
        assert_eq!("Present".parse::<CellState>().unwrap(), CellState::Present);
        assert_eq!("ABSENT".parse::<CellState>().unwrap(), CellState::Absent);
        assert_eq!(" p ".parse::<CellState>().unwrap(), CellState::Present);
    }

    #[test]
    fn test_cell_state_parse_invalid() {
        assert!("2".parse::<CellState>().is_err());
        assert!("yes".parse::<CellState>().is_err());
    }

    #[test]
    fn test_symbol_roundtrip() {
        for state in [CellState::Present, CellState::Absent, CellState::Missing] {
            assert_eq!(state.symbol().parse::<CellState>().unwrap(), state);
        }
    }
}
