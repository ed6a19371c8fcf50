#![no_main]

use endemicity_analyzer::{io::read_nexus_from_bytes, Analyzer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(matrix) = read_nexus_from_bytes(data, "fuzz") {
        let report = Analyzer::new(&matrix).report();
        assert_eq!(
            report.taxa.total_endemic + report.taxa.total_widespread_or_absent,
            matrix.taxon_count()
        );
    }
});
