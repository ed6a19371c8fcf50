use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use endemicity_analyzer::{io::write_csv, CellState, PresenceMatrix};

const SAMPLE_NEXUS: &str = "#NEXUS
BEGIN TAXA;
    DIMENSIONS NTAX=3;
    TAXLABELS Caatinga Cerrado Pampa;
END;

BEGIN CHARACTERS;
    DIMENSIONS NCHAR=4;
    FORMAT SYMBOLS=\"01\" MISSING=?;
    CHARLABELS Leopardus_braccatus Bothrops_neuwiedi Ctenomys_minutus Puma_concolor;
    MATRIX
        Caatinga 1101
        Cerrado  1001
        Pampa    0001
    ;
END;
";

/// Write the sample matrix as NEXUS into the given directory.
fn create_test_nexus(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("biomes.nex");
    std::fs::write(&path, SAMPLE_NEXUS).unwrap();
    path
}

/// Write a small matrix as CSV into the given directory.
fn create_test_csv(dir: &TempDir) -> PathBuf {
    use CellState::{Absent as A, Present as P};
    let path = dir.path().join("islands.csv");
    let m = PresenceMatrix::new(
        vec!["Trindade".into(), "Abrolhos".into()],
        vec!["t1".into(), "t2".into(), "t3".into()],
        vec![vec![P, P, A], vec![A, P, P]],
    )
    .unwrap();
    write_csv(&m, &path).unwrap();
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("endemicity-analyzer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_analyze_nexus() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Area statistics"))
        .stdout(predicate::str::contains("Species statistics"))
        .stdout(predicate::str::contains("Occurrence statistics"))
        .stdout(predicate::str::contains("Total areas = 3"))
        .stdout(predicate::str::contains("Total taxa = 4"))
        .stdout(predicate::str::contains("Total endemics = 1"))
        .stdout(predicate::str::contains("Bothrops neuwiedi"));
}

#[test]
fn test_analyze_csv() {
    let dir = TempDir::new().unwrap();
    let path = create_test_csv(&dir);

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trindade"))
        .stdout(predicate::str::contains("Total areas = 2"))
        .stdout(predicate::str::contains("Total endemics = 2"));
}

#[test]
fn test_analyze_with_outgroup() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap(), "--outgroup", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total areas = 2"))
        .stdout(predicate::str::contains("Total endemics = 1"));
}

#[test]
fn test_analyze_outgroup_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap(), "--outgroup", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_analyze_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let report = dir.path().join("report.txt");

    cmd()
        .args([
            "analyze",
            "--input",
            path.to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("Date and time of analysis - "));
    assert!(text.contains("Data file - biomes.nex"));
    assert!(text.contains("Species occurring in..."));
    assert!(text.contains("Total widespread taxa = 3"));
}

#[test]
fn test_analyze_json_stdout() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    let output = cmd()
        .args(["analyze", "--input", path.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["area_count"], 3);
    assert_eq!(report["taxon_count"], 4);
    assert_eq!(report["taxa"]["total_endemic"], 1);
}

#[test]
fn test_analyze_json_file() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let json_path = dir.path().join("report.json");

    cmd()
        .args([
            "analyze",
            "--input",
            path.to_str().unwrap(),
            "--json",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Area statistics"));

    let content = std::fs::read_to_string(&json_path).unwrap();
    assert!(content.contains("\"histogram\""));
}

#[test]
fn test_analyze_with_config_file() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "[input]\noutgroup = 3\n").unwrap();

    cmd()
        .args([
            "analyze",
            "--input",
            path.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total areas = 2"));
}

#[test]
fn test_analyze_bad_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "[input]\noutgroup = \"first\"\n").unwrap();

    cmd()
        .args([
            "analyze",
            "--input",
            path.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_analyze_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matrix.txt");
    std::fs::write(&path, SAMPLE_NEXUS).unwrap();

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_analyze_missing_file() {
    cmd()
        .args(["analyze", "--input", "/nonexistent/areas.nex"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_malformed_nexus() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.nex");
    std::fs::write(&path, "#NEXUS\nBEGIN CHARACTERS;\n  DIMENSIONS NCHAR=2;\n").unwrap();

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEXUS error"));
}

#[test]
fn test_convert_nexus_to_csv() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let csv_path = dir.path().join("biomes.csv");

    cmd()
        .args([
            "convert",
            "--input",
            path.to_str().unwrap(),
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("area,"));
    assert!(content.contains("Caatinga,1,1,0,1"));

    cmd()
        .args(["analyze", "--input", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total endemics = 1"));
}

#[test]
fn test_convert_csv_to_json() {
    let dir = TempDir::new().unwrap();
    let path = create_test_csv(&dir);
    let json_path = dir.path().join("islands.json");

    cmd()
        .args([
            "convert",
            "--input",
            path.to_str().unwrap(),
            "--output",
            json_path.to_str().unwrap(),
            "--pretty",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&json_path).unwrap();
    assert!(content.contains("Trindade"));
}

#[test]
fn test_convert_to_nexus_rejected() {
    let dir = TempDir::new().unwrap();
    let path = create_test_csv(&dir);
    let out = dir.path().join("islands.nex");

    cmd()
        .args([
            "convert",
            "--input",
            path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure();
}

#[test]
fn test_summary() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    cmd()
        .args(["summary", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Summary"))
        .stdout(predicate::str::contains("biomes"))
        .stdout(predicate::str::contains("Presences"));
}

#[test]
fn test_no_subcommand_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Endemicity Analyzer"));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("endemicity-analyzer"));
}

#[test]
fn test_analyze_json_stdout_still_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);
    let report = dir.path().join("report.txt");

    let output = cmd()
        .args([
            "analyze",
            "--input",
            path.to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["taxa"]["total_endemic"], 1);

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("Total endemics = 1"));
}

#[test]
fn test_analyze_precision_override() {
    let dir = TempDir::new().unwrap();
    let path = create_test_csv(&dir);

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(66.7%)"));

    cmd()
        .args(["analyze", "--input", path.to_str().unwrap(), "--precision", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(67%)"))
        .stdout(predicate::str::contains("(66.7%)").not());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = create_test_nexus(&dir);

    cmd()
        .args(["--verbose", "analyze", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("matrix loaded"))
        .stdout(predicate::str::contains("matrix loaded").not());
}

/// CSV using `N` for missing cells, readable only with a matching config.
fn create_csv_with_custom_missing(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("atlas.csv");
    std::fs::write(&path, "area,t1,t2\nNorth,1,N\nSouth,0,1\n").unwrap();
    std::fs::write(
        dir.path().join("endemicity.toml"),
        "[input]\nmissing_symbols = [\"N\"]\noutgroup = 1\n",
    )
    .unwrap();
    path
}

#[test]
fn test_convert_uses_config_missing_symbols() {
    let dir = TempDir::new().unwrap();
    let path = create_csv_with_custom_missing(&dir);
    let out = dir.path().join("atlas.json");

    cmd()
        .current_dir(dir.path())
        .args([
            "convert",
            "--input",
            path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("Missing"));
    // outgroup applies to analysis only; conversion keeps every area
    assert!(content.contains("North"));
    assert!(content.contains("South"));
}

#[test]
fn test_summary_uses_config_missing_symbols() {
    let dir = TempDir::new().unwrap();
    let path = create_csv_with_custom_missing(&dir);

    cmd()
        .current_dir(dir.path())
        .args(["summary", "--input", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Summary"));

    cmd()
        .args(["summary", "--input", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cell state"));
}
