//! Command-line behaviour tests.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{standard_references, write_input, INPUT_HEADER};

fn annotator() -> Command {
    Command::cargo_bin("variant-annotator").unwrap()
}

#[test]
fn test_annotate_writes_output_and_failures() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    write_input(
        &input,
        &[
            "chr1\t1000\trs123\tA\tT",
            "chr1\t1000\trs124\tG\tT",
            "chr23\t5\trs125\tA\tC",
        ],
    );

    annotator()
        .args(["annotate", "-p", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved:       1"))
        .stdout(predicate::str::contains("MissingChromosomeFile: 1"));

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "#CHROM\tPOS\tID\tREF\tALT\nchr1\t1000\trs123\tA\tT\n"
    );

    let failures = std::fs::read_to_string(dir.path().join("annotated.tsv.failures.tsv")).unwrap();
    let rows: Vec<&str> = failures.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("chr1\t1000\trs124\tG\tT\tAlleleMismatch\t"));
    assert!(rows[1].starts_with("chr23\t5\trs125\tA\tC\tMissingChromosomeFile\t"));
}

#[test]
fn test_json_summary_and_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    let report = dir.path().join("report.json");
    write_input(&input, &["chr2\t50\trs1\tC\tG", "chr2\t9999\trs2\tC\tG"]);

    let assert = annotator()
        .args(["--format", "json", "annotate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let stdout: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(stdout["total_records"], 2);
    assert_eq!(stdout["resolved"], 1);
    assert_eq!(stdout["failures_by_reason"]["out_of_range_position"], 1);

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(saved["resolved"], 1);
}

#[test]
fn test_validate_only_does_not_process() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    write_input(&input, &["chr1\t1000\trs123\tA\tT"]);

    annotator()
        .args(["annotate", "--validate-only", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .success()
        .stderr(predicate::str::contains("Validation successful"));

    assert!(!output.exists());
}

#[test]
fn test_invalid_header_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    std::fs::write(&input, "#CHROM\tPOS\tID\tREF\tALT\nchr1\t1000\trs1\tA\tT\n").unwrap();

    annotator()
        .args(["annotate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 'allele1', got 'REF'"));

    assert!(!output.exists());

    annotator()
        .args(["annotate", "--validate-only", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .failure();
}

#[test]
fn test_unreadable_reference_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    write_input(&input, &["chr1\t1000\trs123\tA\tT"]);

    let empty_refs = dir.path().join("refs");
    std::fs::create_dir(&empty_refs).unwrap();

    annotator()
        .args(["annotate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&empty_refs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unreadable reference directory"));

    assert!(!output.exists());
}

#[test]
fn test_skip_header_check() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    std::fs::write(&input, "chrom\tpos\tid\ta1\ta2\nchr1\t1000\trs1\tT\tA\n").unwrap();

    annotator()
        .args(["annotate", "--skip-header-check", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.ends_with("chr1\t1000\trs1\tA\tT\n"));
}

#[test]
fn test_log_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let refs = standard_references(dir.path());
    let input = dir.path().join("panel.tsv");
    let output = dir.path().join("annotated.tsv");
    let log = dir.path().join("logs").join("annotation.log");
    write_input(&input, &["chr1\t1000\trs1\tA\tT"]);

    annotator()
        .arg("--log-file")
        .arg(&log)
        .args(["annotate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-d")
        .arg(&refs)
        .assert()
        .success();

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("Finished chr1"));
    assert!(!text.contains("\u{1b}["));
}

#[test]
fn test_zero_processes_rejected() {
    annotator()
        .args(["annotate", "-i", "a.tsv", "-o", "b.tsv", "-d", "refs", "-p", "0"])
        .assert()
        .failure();
}

#[test]
fn test_header_constant_matches_cli_expectation() {
    assert_eq!(
        INPUT_HEADER,
        variant_annotator::parsing::tsv::INPUT_COLUMNS.join("\t")
    );
}
