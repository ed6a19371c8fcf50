//! Format conversion example: convert a NEXUS matrix to CSV, JSON, and Excel.
//!
//! Run from the project root:
//!   cargo run --example format_conversion

use std::path::Path;

use endemicity_analyzer::io::{
    CsvFormat, ExcelFormat, JsonFormat, MatrixReader, MatrixWriter, NexusFormat,
};

fn main() {
    let input = Path::new("data/samples/biomes.nex");
    let matrix = NexusFormat.read(input).expect("Failed to read NEXUS file");
    println!(
        "Loaded '{}': {} areas, {} taxa",
        matrix.name(),
        matrix.area_count(),
        matrix.taxon_count()
    );

    let csv_path = Path::new("output_example.csv");
    CsvFormat::default()
        .write(&matrix, csv_path)
        .expect("Failed to write CSV");
    println!("Wrote {}", csv_path.display());

    let json_path = Path::new("output_example.json");
    JsonFormat { pretty: true }
        .write(&matrix, json_path)
        .expect("Failed to write JSON");
    println!("Wrote {}", json_path.display());

    let xlsx_path = Path::new("output_example.xlsx");
    ExcelFormat::default()
        .write(&matrix, xlsx_path)
        .expect("Failed to write Excel");
    println!("Wrote {}", xlsx_path.display());

    // Round-trip: missing cells survive JSON exactly, CSV keeps the same presences
    let reloaded = JsonFormat::default()
        .read(json_path)
        .expect("Failed to read back JSON");
    assert_eq!(reloaded.present_cell_count(), matrix.present_cell_count());
    let from_csv = CsvFormat::default()
        .read(csv_path)
        .expect("Failed to read back CSV");
    assert_eq!(from_csv.row(3), matrix.row(3));
    println!("Round-trip verified: JSON and CSV match original");

    for path in [csv_path, json_path, xlsx_path] {
        let _ = std::fs::remove_file(path);
    }
    println!("Cleaned up output files");
}
