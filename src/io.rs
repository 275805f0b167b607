//! Reading chord charts from disk and writing transposed copies

use anyhow::{Context, Result};
use chordshift_core::{Document, Key, KeyTable, TranspositionReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a file transposition produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: PathBuf,
    pub source_key: Key,
    pub target_key: Key,
    pub report: TranspositionReport,
}

/// Derive the output path, e.g. `song.txt` -> `song_transposed_D.txt`
pub fn output_path(input: &Path, suffix: &str, key: Key) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match input.extension() {
        Some(ext) => format!("{}{}{}.{}", stem, suffix, key, ext.to_string_lossy()),
        None => format!("{}{}{}", stem, suffix, key),
    };

    input.with_file_name(name)
}

/// Read a file as lines, without line terminators
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write lines to a file, each followed by a newline
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Transpose `input` to `target`, writing the result next to it.
///
/// Nothing is written unless the whole document transposed successfully.
pub fn transpose_file(
    table: &KeyTable,
    input: &Path,
    target: Key,
    suffix: &str,
) -> Result<Outcome> {
    let lines = read_lines(input)?;
    let document = Document::parse(lines)
        .with_context(|| format!("Cannot transpose {}", input.display()))?;
    let (transposed, report) = document
        .transpose_with_report(table, target)
        .with_context(|| format!("Cannot transpose {}", input.display()))?;

    let output = output_path(input, suffix, target);
    write_lines(&output, &transposed)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "wrote transposed chart"
    );

    Ok(Outcome {
        output,
        source_key: document.source_key(),
        target_key: target,
        report,
    })
}
