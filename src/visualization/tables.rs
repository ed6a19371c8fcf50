use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, Color,
    ContentArrangement, Table,
};

use crate::analysis::{AreaStat, EndemicityReport, EndemismStatus, TaxonEndemismReport};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format the per-area richness table as a string.
pub fn format_area_table(areas: &[AreaStat]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Area statistics".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(56)));

    let mut table = new_table();
    table.set_header(vec!["Area", "Taxa present"]);
    for area in areas {
        table.add_row(vec![
            Cell::new(&area.label),
            Cell::new(area.present_count).set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output.push_str(&format!("  Total areas = {}\n", areas.len()));
    output
}

/// Print the per-area richness table.
pub fn print_area_table(areas: &[AreaStat]) {
    print!("{}", format_area_table(areas));
}

/// Format the per-taxon endemism table and totals as a string.
pub fn format_taxon_table(taxa: &TaxonEndemismReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Species statistics".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec!["Taxon", "Areas", "Status"]);
    for taxon in &taxa.taxa {
        let status = match taxon.status {
            EndemismStatus::Endemic => Cell::new(taxon.status).fg(Color::Yellow),
            EndemismStatus::Absent => Cell::new(taxon.status).fg(Color::DarkGrey),
            EndemismStatus::Widespread => Cell::new(taxon.status),
        };
        table.add_row(vec![
            Cell::new(&taxon.label),
            Cell::new(taxon.occurrence_count).set_alignment(CellAlignment::Right),
            status,
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output.push_str(&format!("  Total taxa = {}\n", taxa.taxon_count()));
    output.push_str(&format!(
        "  Total widespread taxa = {}\n",
        taxa.total_widespread_or_absent
    ));
    output.push_str(&format!("  Total endemics = {}\n", taxa.total_endemic));
    output
}

/// Print the per-taxon endemism table.
pub fn print_taxon_table(taxa: &TaxonEndemismReport) {
    print!("{}", format_taxon_table(taxa));
}

/// Format a short overview of the analysed matrix.
pub fn format_summary(report: &EndemicityReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Quick Summary".bold().cyan()));
    output.push_str(&format!("{}\n", "=".repeat(40)));

    let present: usize = report.areas.iter().map(|a| a.present_count).sum();
    let cells = report.area_count * report.taxon_count;
    let fill = crate::analysis::percent(present, cells);

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    let rows: [(&str, String); 6] = [
        ("Name", report.name.clone()),
        ("Areas", report.area_count.to_string()),
        ("Taxa", report.taxon_count.to_string()),
        ("Presences", present.to_string()),
        ("Matrix fill", format!("{fill:.1}%")),
        ("Endemics", report.taxa.total_endemic.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print a short overview of the analysed matrix.
pub fn print_summary(report: &EndemicityReport) {
    print!("{}", format_summary(report));
}
