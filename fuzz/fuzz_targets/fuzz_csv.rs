#![no_main]

use endemicity_analyzer::{io::read_csv_from_bytes, Analyzer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let missing = vec!["?".to_string()];
    if let Ok(matrix) = read_csv_from_bytes(data, "fuzz", &missing) {
        let _ = Analyzer::new(&matrix).report();
    }
});
