mod charts;
mod format;
mod report;
mod tables;

pub use charts::{format_occurrence_histogram, print_occurrence_histogram};
pub use format::format_significant;
pub use report::{format_text_report, write_text_report, TextReportOptions};
pub use tables::{
    format_area_table, format_summary, format_taxon_table, print_area_table, print_summary,
    print_taxon_table,
};
