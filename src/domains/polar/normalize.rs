//! Solver output normalization.
//!
//! XFOIL writes its polar as a whitespace-aligned text table whose layout is
//! not stable across versions: column widths vary, the header may be missing
//! or preceded by a banner, and the process often exits non-zero after a
//! perfectly good run. Everything is reduced to one CSV contract:
//!
//! ```text
//! # xfoil exit code 2          only when the exit code is non-zero
//! alpha,CL,CD,CM               inserted unless the solver's first row is a header
//! 0.0,0.3,0.01,-0.05
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::{PolarError, PolarResult};

/// Header inserted when the solver output does not start with one.
pub const CANONICAL_HEADER: [&str; 4] = ["alpha", "CL", "CD", "CM"];

/// Canonical CSV polar table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolarTable(String);

impl PolarTable {
    /// The CSV text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the table, returning the CSV text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PolarTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comment line recording a non-zero solver exit code.
pub fn exit_code_comment(exit_code: i32) -> Option<String> {
    (exit_code != 0).then(|| format!("# xfoil exit code {}", exit_code))
}

/// Read the solver's polar file and turn it into the canonical table.
///
/// A missing file is always fatal, whatever the exit code.
pub fn normalize(output_path: &Path, exit_code: i32) -> PolarResult<PolarTable> {
    if !output_path.is_file() {
        return Err(PolarError::missing_output(output_path));
    }

    let bytes = fs::read(output_path)?;
    let text = String::from_utf8_lossy(&bytes);
    debug!(
        "Normalizing {} ({} bytes, exit code {})",
        output_path.display(),
        bytes.len(),
        exit_code
    );

    Ok(normalize_text(&text, exit_code))
}

/// Normalize raw solver text. Split out from [`normalize`] so the table rules
/// can be exercised without touching the filesystem.
pub fn normalize_text(text: &str, exit_code: i32) -> PolarTable {
    let mut rows = parse_rows(text);
    reconcile_header(&mut rows);

    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    lines.extend(exit_code_comment(exit_code));
    lines.extend(rows.iter().map(|row| row.join(",")));

    PolarTable(lines.join("\n"))
}

/// Split each non-blank line into cells. Any run of whitespace and/or commas
/// is a single delimiter.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(split_cells)
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Put the canonical header on top unless the first row already looks like one.
fn reconcile_header(rows: &mut Vec<Vec<String>>) {
    let has_header = rows
        .first()
        .and_then(|row| row.first())
        .is_some_and(|cell| cell.to_lowercase().contains("alpha"));

    if !has_header {
        rows.insert(0, CANONICAL_HEADER.iter().map(|c| c.to_string()).collect());
    }
}
