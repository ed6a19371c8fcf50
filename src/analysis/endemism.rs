use serde::{Deserialize, Serialize};

use crate::models::PresenceMatrix;

/// Distribution status of a taxon, derived from its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndemismStatus {
    Absent,
    Endemic,
    Widespread,
}

impl EndemismStatus {
    /// `0` is absent, `1` is endemic, anything larger is widespread.
    pub fn from_occurrences(occurrence_count: usize) -> Self {
        match occurrence_count {
            0 => EndemismStatus::Absent,
            1 => EndemismStatus::Endemic,
            _ => EndemismStatus::Widespread,
        }
    }
}

impl std::fmt::Display for EndemismStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndemismStatus::Absent => write!(f, "Absent"),
            EndemismStatus::Endemic => write!(f, "Endemic"),
            EndemismStatus::Widespread => write!(f, "Widespread"),
        }
    }
}

/// Occurrence count and status for a single taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonStat {
    pub taxon_index: usize,
    pub label: String,
    pub occurrence_count: usize,
    pub status: EndemismStatus,
}

/// Per-taxon statistics plus the endemic / non-endemic totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonEndemismReport {
    pub taxa: Vec<TaxonStat>,
    pub total_endemic: usize,
    /// Reported as "total widespread taxa": every taxon that is not
    /// endemic, absent taxa included.
    pub total_widespread_or_absent: usize,
}

impl TaxonEndemismReport {
    pub fn taxon_count(&self) -> usize {
        self.taxa.len()
    }

    /// Number of taxa whose status is strictly `Widespread`.
    pub fn strictly_widespread(&self) -> usize {
        self.count_status(EndemismStatus::Widespread)
    }

    pub fn count_status(&self, status: EndemismStatus) -> usize {
        self.taxa.iter().filter(|t| t.status == status).count()
    }
}

/// Number of areas each taxon is present in, in taxon-index order.
pub fn occurrence_counts(matrix: &PresenceMatrix) -> Vec<usize> {
    matrix
        .taxa()
        .map(|taxon| matrix.column(taxon.index).filter(|c| c.is_present()).count())
        .collect()
}

/// Classify every taxon and total the endemics.
pub fn compute_taxon_stats(matrix: &PresenceMatrix) -> TaxonEndemismReport {
    let taxa: Vec<TaxonStat> = occurrence_counts(matrix)
        .into_iter()
        .enumerate()
        .map(|(taxon_index, occurrence_count)| TaxonStat {
            taxon_index,
            label: matrix.taxon_label(taxon_index).to_string(),
            occurrence_count,
            status: EndemismStatus::from_occurrences(occurrence_count),
        })
        .collect();

    let total_endemic = taxa
        .iter()
        .filter(|t| t.status == EndemismStatus::Endemic)
        .count();

    TaxonEndemismReport {
        total_widespread_or_absent: taxa.len() - total_endemic,
        total_endemic,
        taxa,
    }
}
