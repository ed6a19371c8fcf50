mod analyzer;
mod area_richness;
mod endemism;
mod histogram;
mod percent;

pub use analyzer::{Analyzer, EndemicityReport};
pub use area_richness::{compute_area_stats, AreaStat};
pub use endemism::{
    compute_taxon_stats, occurrence_counts, EndemismStatus, TaxonEndemismReport, TaxonStat,
};
pub use histogram::{compute_histogram, HistogramBucket, OccurrenceBucket, OccurrenceHistogram};
pub use percent::percent;
