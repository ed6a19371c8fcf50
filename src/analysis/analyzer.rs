use serde::{Deserialize, Serialize};

use crate::analysis::{
    compute_area_stats, compute_histogram, compute_taxon_stats, AreaStat, OccurrenceHistogram,
    TaxonEndemismReport,
};
use crate::models::PresenceMatrix;

/// All three reports for one matrix, ready for rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndemicityReport {
    pub name: String,
    pub area_count: usize,
    pub taxon_count: usize,
    pub areas: Vec<AreaStat>,
    pub taxa: TaxonEndemismReport,
    pub histogram: OccurrenceHistogram,
}

/// Unified analysis API that groups all report computations on a matrix.
pub struct Analyzer<'a> {
    matrix: &'a PresenceMatrix,
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given matrix.
    pub fn new(matrix: &'a PresenceMatrix) -> Self {
        Self { matrix }
    }

    /// Present-taxon count per area.
    pub fn area_stats(&self) -> Vec<AreaStat> {
        compute_area_stats(self.matrix)
    }

    /// Occurrence count and endemism status per taxon.
    pub fn taxon_stats(&self) -> TaxonEndemismReport {
        compute_taxon_stats(self.matrix)
    }

    /// Distribution of taxa over 1, 2, 3, 4 and five-or-more areas.
    pub fn histogram(&self) -> OccurrenceHistogram {
        OccurrenceHistogram::from_matrix(self.matrix)
    }

    /// Compute every report in one call.
    pub fn report(&self) -> EndemicityReport {
        let taxa = self.taxon_stats();
        let histogram = compute_histogram(&taxa.taxa);
        EndemicityReport {
            name: self.matrix.name().to_string(),
            area_count: self.matrix.area_count(),
            taxon_count: self.matrix.taxon_count(),
            areas: self.area_stats(),
            taxa,
            histogram,
        }
    }
}
