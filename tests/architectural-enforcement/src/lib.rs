//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The simulation core stays headless (no terminal crates)
//! - No sleep() calls in production code
//! - No unwrap()/expect() in production code
//!
//! These tests are designed to catch violations early in the development cycle.
//! This library only holds the source-scanning helpers they share.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A production source line
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line text with any `//` comment removed
    pub code: String,
}

/// Every production line of every `.rs` file under `dir` (relative to the
/// workspace root)
///
/// A file's production code ends at its first `#[cfg(test)]`; test modules
/// sit at the bottom of each file.
pub fn production_lines(dir: &str) -> Vec<SourceLine> {
    let root = workspace_root().join(dir);
    let mut lines = Vec::new();

    for entry in walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            let code = line.split("//").next().unwrap_or(line).to_string();
            lines.push(SourceLine {
                path: path.to_path_buf(),
                number: idx + 1,
                code,
            });
        }
    }

    lines
}

/// Format violations for a panic message
pub fn report(lines: &[&SourceLine]) -> String {
    lines
        .iter()
        .map(|l| format!("  {}:{} - {}", l.path.display(), l.number, l.code.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
