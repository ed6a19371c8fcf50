use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use endemicity_analyzer::{
    config::{AnalysisConfig, InputConfig},
    io,
    visualization::{
        print_area_table, print_occurrence_histogram, print_summary, print_taxon_table,
        write_text_report, TextReportOptions,
    },
    Analyzer,
};

#[derive(Parser)]
#[command(
    name = "endemicity-analyzer",
    about = "Endemicity Analyzer - Area richness and taxon endemism statistics",
    version,
    author
)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute area, species and occurrence statistics for a matrix
    Analyze {
        /// Path to input file (NEXUS, CSV, JSON, or Excel)
        #[arg(short, long)]
        input: PathBuf,

        /// 1-based area number to exclude as outgroup (0 for none)
        #[arg(long)]
        outgroup: Option<usize>,

        /// Write the plain-text report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the full report as JSON (to stdout, or to PATH)
        #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "-")]
        json: Option<PathBuf>,

        /// Significant digits for percentages
        #[arg(long)]
        precision: Option<usize>,

        /// TOML config file (defaults to ./endemicity.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert a presence matrix between formats
    Convert {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (CSV, JSON, or Excel)
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Display a quick summary of the matrix
    Summary {
        /// Path to input file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Configured input settings with every area kept.
fn whole_matrix_input() -> Result<InputConfig> {
    let cfg = AnalysisConfig::load(None).context("failed to load configuration")?;
    Ok(InputConfig {
        outgroup: 0,
        ..cfg.input
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            outgroup,
            output,
            json,
            precision,
            config,
        } => {
            let mut cfg = AnalysisConfig::load(config.as_deref())
                .context("failed to load configuration")?;
            if let Some(n) = outgroup {
                cfg.input.outgroup = n;
            }
            if let Some(p) = precision {
                cfg.report.precision = p;
            }
            if output.is_some() {
                cfg.report.output = output;
            }

            let matrix = io::load_matrix(&input, &cfg.input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            let report = Analyzer::new(&matrix).report();

            // JSON on stdout replaces the tables; file outputs are still written
            let json_to_stdout = json.as_deref() == Some(Path::new("-"));

            if json_to_stdout {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "\n{}",
                    format!("Endemicity Analysis: {}", input.display())
                        .bold()
                        .cyan()
                );
                println!(
                    "  Loaded {} areas with {} taxa",
                    matrix.area_count(),
                    matrix.taxon_count()
                );

                print_area_table(&report.areas);
                print_taxon_table(&report.taxa);
                print_occurrence_histogram(&report.histogram, cfg.report.precision);
            }

            if let Some(path) = &cfg.report.output {
                write_text_report(
                    &report,
                    &display_name(&input),
                    path,
                    TextReportOptions::from(&cfg.report),
                )?;
                if !json_to_stdout {
                    println!(
                        "{} Report written to {}",
                        "Success:".green().bold(),
                        path.display()
                    );
                }
            }

            if let Some(path) = json.filter(|_| !json_to_stdout) {
                std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
                println!(
                    "{} JSON report written to {}",
                    "Success:".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Convert {
            input,
            output,
            pretty,
        } => {
            let matrix = io::load_matrix(&input, &whole_matrix_input()?)?;
            io::save_matrix(&matrix, &output, pretty)?;

            println!(
                "{} Converted {} -> {}",
                "Success:".green().bold(),
                input.display(),
                output.display()
            );
        }

        Commands::Summary { input } => {
            let matrix = io::load_matrix(&input, &whole_matrix_input()?)?;
            print_summary(&Analyzer::new(&matrix).report());
        }
    }

    Ok(())
}
