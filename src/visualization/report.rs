use std::path::Path;

use chrono::Local;
use tracing::info;

use super::format_significant;
use crate::analysis::EndemicityReport;
use crate::config::ReportConfig;
use crate::error::EndemicityError;

/// Layout options for the plain-text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextReportOptions {
    /// Width of the left-justified label column
    pub label_width: usize,
    /// Significant digits shown for percentages
    pub precision: usize,
}

impl Default for TextReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for TextReportOptions {
    fn from(cfg: &ReportConfig) -> Self {
        Self {
            label_width: cfg.label_width,
            precision: cfg.precision,
        }
    }
}

/// Render the fixed-width plain-text report.
///
/// The layout is stable so that reports can be diffed between runs:
/// a header with `timestamp` and `data_file`, then area richness, taxon
/// endemism and occurrence sections. Labels are left-justified in a column
/// of `options.label_width` characters, counts and statuses in columns of ten.
pub fn format_text_report(
    report: &EndemicityReport,
    data_file: &str,
    timestamp: &str,
    options: TextReportOptions,
) -> String {
    let w = options.label_width;
    let mut output = String::new();

    output.push_str(&format!("Endemicity analysis of {}\n", report.name));
    output.push_str(&format!("Date and time of analysis - {timestamp}\n"));
    output.push_str(&format!("Data file - {data_file}\n\n"));

    output.push_str("Area statistics\n\n");
    for area in &report.areas {
        output.push_str(&format!(
            "{:<w$} {:<10} taxa\n",
            area.label, area.present_count
        ));
    }
    output.push_str(&format!("{}\n", "-".repeat(56)));
    output.push_str(&format!("Total areas = {}\n", report.area_count));
    output.push_str(&format!("{}\n\n", "-".repeat(56)));

    output.push_str("Species statistics\n\n");
    for taxon in &report.taxa.taxa {
        output.push_str(&format!(
            "{:<w$}{:<10}{:<10}\n",
            taxon.label,
            taxon.occurrence_count,
            taxon.status.to_string()
        ));
    }
    output.push_str(&format!("{}\n", "-".repeat(60)));
    output.push_str(&format!("Total taxa = {}\n", report.taxa.taxon_count()));
    output.push_str(&format!(
        "Total widespread taxa = {}\n",
        report.taxa.total_widespread_or_absent
    ));
    output.push_str(&format!("Total endemics = {}\n", report.taxa.total_endemic));
    output.push_str(&format!("{}\n\n", "-".repeat(60)));

    output.push_str("Occurrence statistics\n\n");
    output.push_str("Species occurring in...\n");
    for bucket in &report.histogram.buckets {
        let label = format!("   {} ", bucket.bucket.label());
        output.push_str(&format!(
            "{label:<w$}{:<10}({}%)\n",
            bucket.taxon_tally,
            format_significant(bucket.percentage_of_total_taxa, options.precision)
        ));
    }
    output
}

/// Write the plain-text report to `path`, stamped with the local time.
pub fn write_text_report(
    report: &EndemicityReport,
    data_file: &str,
    path: impl AsRef<Path>,
    options: TextReportOptions,
) -> Result<(), EndemicityError> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let text = format_text_report(report, data_file, &timestamp, options);
    std::fs::write(path.as_ref(), text)?;
    info!(path = %path.as_ref().display(), "report written");
    Ok(())
}
