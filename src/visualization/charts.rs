use colored::Colorize;

use super::format_significant;
use crate::analysis::OccurrenceHistogram;

/// Format the occurrence histogram as a text bar chart.
pub fn format_occurrence_histogram(hist: &OccurrenceHistogram, precision: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Occurrence statistics".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if hist.total_taxa == 0 {
        output.push_str("  No taxa in matrix.\n");
        return output;
    }

    let max_tally = hist.buckets.iter().map(|b| b.taxon_tally).max().unwrap_or(0);
    let bar_width = 30;

    output.push_str("  Species occurring in:\n");
    output.push_str(&format!("  {}\n", "-".repeat(70)));

    for bucket in &hist.buckets {
        let bar_len = if max_tally > 0 {
            ((bucket.taxon_tally as f64 / max_tally as f64) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = "\u{2588}".repeat(bar_len);
        let pct = format!(
            "({}%)",
            format_significant(bucket.percentage_of_total_taxa, precision)
        );

        output.push_str(&format!(
            "  {:<20} {:>6}  {:<9} {}\n",
            bucket.bucket.label(),
            bucket.taxon_tally,
            pct,
            bar.green()
        ));
    }

    output.push('\n');
    output
}

/// Print the occurrence histogram as a text bar chart.
pub fn print_occurrence_histogram(hist: &OccurrenceHistogram, precision: usize) {
    print!("{}", format_occurrence_histogram(hist, precision));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_histogram_empty() {
        let hist = OccurrenceHistogram::from_occurrence_counts(&[]);
        let output = format_occurrence_histogram(&hist, 3);
        assert!(output.contains("Occurrence statistics"));
        assert!(output.contains("No taxa in matrix."));
    }

    #[test]
    fn test_format_histogram_rows() {
        let hist = OccurrenceHistogram::from_occurrence_counts(&[2, 1, 0, 3]);
        let output = format_occurrence_histogram(&hist, 3);
        assert!(output.contains("One area"));
        assert!(output.contains("Five or more areas"));
        assert!(output.contains("(25%)"));
        assert!(output.contains("(0%)"));
    }

    #[test]
    fn test_format_histogram_precision() {
        let hist = OccurrenceHistogram::from_occurrence_counts(&[1, 1, 2]);
        assert!(format_occurrence_histogram(&hist, 3).contains("(66.7%)"));
        assert!(format_occurrence_histogram(&hist, 2).contains("(67%)"));
    }
}
