use serde::{Deserialize, Serialize};

use super::endemism::{occurrence_counts, TaxonStat};
use super::percent;
use crate::models::PresenceMatrix;

/// Occurrence-count class of the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OccurrenceBucket {
    One,
    Two,
    Three,
    Four,
    FiveOrMore,
}

impl OccurrenceBucket {
    pub const ALL: [OccurrenceBucket; 5] = [
        OccurrenceBucket::One,
        OccurrenceBucket::Two,
        OccurrenceBucket::Three,
        OccurrenceBucket::Four,
        OccurrenceBucket::FiveOrMore,
    ];

    /// Bucket holding a taxon found in `occurrence_count` areas.
    ///
    /// Absent taxa (`0`) belong to no bucket; every positive count lands in
    /// exactly one.
    pub fn for_count(occurrence_count: usize) -> Option<Self> {
        match occurrence_count {
            0 => None,
            1 => Some(OccurrenceBucket::One),
            2 => Some(OccurrenceBucket::Two),
            3 => Some(OccurrenceBucket::Three),
            4 => Some(OccurrenceBucket::Four),
            _ => Some(OccurrenceBucket::FiveOrMore),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Row caption used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            OccurrenceBucket::One => "One area",
            OccurrenceBucket::Two => "Two areas",
            OccurrenceBucket::Three => "Three areas",
            OccurrenceBucket::Four => "Four areas",
            OccurrenceBucket::FiveOrMore => "Five or more areas",
        }
    }
}

impl std::fmt::Display for OccurrenceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tally of taxa in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub bucket: OccurrenceBucket,
    pub taxon_tally: usize,
    /// Share of the full taxon count, absent taxa included.
    pub percentage_of_total_taxa: f64,
}

/// Distribution of taxa by the number of areas they occupy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceHistogram {
    pub buckets: [HistogramBucket; 5],
    pub total_taxa: usize,
}

impl OccurrenceHistogram {
    /// Build from raw per-taxon occurrence counts.
    pub fn from_occurrence_counts(counts: &[usize]) -> Self {
        let mut tallies = [0usize; 5];
        for bucket in counts.iter().filter_map(|&n| OccurrenceBucket::for_count(n)) {
            tallies[bucket.index()] += 1;
        }

        let total_taxa = counts.len();
        let buckets = OccurrenceBucket::ALL.map(|bucket| HistogramBucket {
            bucket,
            taxon_tally: tallies[bucket.index()],
            percentage_of_total_taxa: percent(tallies[bucket.index()], total_taxa),
        });

        OccurrenceHistogram {
            buckets,
            total_taxa,
        }
    }

    /// Build directly from the matrix without going through taxon stats.
    pub fn from_matrix(matrix: &PresenceMatrix) -> Self {
        Self::from_occurrence_counts(&occurrence_counts(matrix))
    }

    pub fn bucket(&self, bucket: OccurrenceBucket) -> &HistogramBucket {
        &self.buckets[bucket.index()]
    }

    /// Number of taxa counted in some bucket, i.e. taxa present somewhere.
    pub fn tallied_taxa(&self) -> usize {
        self.buckets.iter().map(|b| b.taxon_tally).sum()
    }
}

/// Bucket the occurrence counts of already-computed taxon statistics.
pub fn compute_histogram(taxon_stats: &[TaxonStat]) -> OccurrenceHistogram {
    let counts: Vec<usize> = taxon_stats.iter().map(|t| t.occurrence_count).collect();
    OccurrenceHistogram::from_occurrence_counts(&counts)
}
