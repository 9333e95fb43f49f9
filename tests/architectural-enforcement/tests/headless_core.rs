//! Integration Test: Headless Simulation Core
//!
//! **Policy**: `universe/core` knows nothing about terminals. Rendering,
//! layout and input belong to the `tui` crate.

use std::fs;

use architectural_enforcement::{production_lines, report, workspace_root};

const TERMINAL_CRATES: [&str; 3] = ["ratatui", "crossterm", "unicode_width"];

#[test]
fn test_core_sources_do_not_use_terminal_crates() {
    let lines = production_lines("universe/core/src");
    assert!(!lines.is_empty(), "universe/core/src not found");

    let violations: Vec<_> = lines
        .iter()
        .filter(|l| TERMINAL_CRATES.iter().any(|c| l.code.contains(c)))
        .collect();

    assert!(
        violations.is_empty(),
        "\nTerminal crates used in the simulation core:\n{}",
        report(&violations)
    );
}

#[test]
fn test_core_manifest_has_no_terminal_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("universe/core/Cargo.toml"))
        .expect("universe/core/Cargo.toml readable");

    for name in ["ratatui", "crossterm", "unicode-width"] {
        assert!(
            !manifest.contains(name),
            "universe/core/Cargo.toml depends on {name}"
        );
    }
}
