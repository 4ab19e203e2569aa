//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const INPUT_HEADER: &str = "#CHROM\tPOS\tID\tallele1\tallele2";

/// Write `<dir>/<stem>.fa` (wrapped at 60 bases) and a matching `.fai`
pub fn write_reference(dir: &Path, stem: &str, name: &str, sequence: &str) -> PathBuf {
    const LINE_BASES: usize = 60;

    let fasta_path = dir.join(format!("{stem}.fa"));
    let header = format!(">{name}\n");
    let mut text = header.clone();
    for chunk in sequence.as_bytes().chunks(LINE_BASES) {
        text.push_str(std::str::from_utf8(chunk).unwrap());
        text.push('\n');
    }
    std::fs::write(&fasta_path, text).unwrap();

    let line_bases = sequence.len().min(LINE_BASES);
    std::fs::write(
        dir.join(format!("{stem}.fa.fai")),
        format!(
            "{name}\t{}\t{}\t{line_bases}\t{}\n",
            sequence.len(),
            header.len(),
            line_bases + 1
        ),
    )
    .unwrap();

    fasta_path
}

/// A sequence of `length` bases cycling `CGT`, with `base` placed at 1-based `position`
pub fn sequence_with(length: usize, position: usize, base: char) -> String {
    let mut bases: Vec<char> = "CGT".chars().cycle().take(length).collect();
    bases[position - 1] = base;
    bases.into_iter().collect()
}

/// Write an input table with the standard header
pub fn write_input(path: &Path, rows: &[&str]) {
    let mut text = format!("{INPUT_HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

/// Reference directory with chr1 (A at 1000) and chr2 (G at 50)
pub fn standard_references(dir: &Path) -> PathBuf {
    let refs = dir.join("refs");
    std::fs::create_dir_all(&refs).unwrap();
    write_reference(&refs, "chr1", "chr1", &sequence_with(1200, 1000, 'A'));
    write_reference(&refs, "chr2", "chr2", &sequence_with(300, 50, 'G'));
    refs
}
