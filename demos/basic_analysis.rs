//! Basic analysis example: load a NEXUS matrix, compute the reports and display them.
//!
//! Run from the project root:
//!   cargo run --example basic_analysis

use std::path::Path;

use endemicity_analyzer::analysis::{Analyzer, EndemismStatus};
use endemicity_analyzer::io::{MatrixReader, NexusFormat};
use endemicity_analyzer::visualization::{
    print_area_table, print_occurrence_histogram, print_taxon_table,
};

fn main() {
    let path = Path::new("data/samples/biomes.nex");
    let reader = NexusFormat;

    let matrix = reader.read(path).expect("Failed to read NEXUS file");
    println!(
        "Loaded '{}': {} areas, {} taxa",
        matrix.name(),
        matrix.area_count(),
        matrix.taxon_count()
    );

    let analyzer = Analyzer::new(&matrix);

    print_area_table(&analyzer.area_stats());

    let taxa = analyzer.taxon_stats();
    print_taxon_table(&taxa);
    for taxon in taxa.taxa.iter().filter(|t| t.status == EndemismStatus::Endemic) {
        println!("  endemic: {}", taxon.label);
    }

    print_occurrence_histogram(&analyzer.histogram(), 3);

    // Drop the first area and compare endemism counts
    let trimmed = matrix.without_area(1).expect("Failed to remove outgroup");
    let after = Analyzer::new(&trimmed).taxon_stats();
    println!(
        "\nWithout {}: {} endemics (was {})",
        matrix.area_label(0),
        after.total_endemic,
        taxa.total_endemic
    );
}
