//! Integration Test: No Panicking Shortcuts
//!
//! **Policy**: Production code propagates errors with `?` and typed error
//! enums. `unwrap()`/`expect()` are for tests only.

use architectural_enforcement::{production_lines, report};

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let mut violations = Vec::new();

    for dir in ["universe/core/src", "tui/src"] {
        violations.extend(
            production_lines(dir)
                .into_iter()
                .filter(|l| l.code.contains(".unwrap()") || l.code.contains(".expect(")),
        );
    }

    assert!(
        violations.is_empty(),
        "\nunwrap()/expect() found in production code:\n{}",
        report(&violations.iter().collect::<Vec<_>>())
    );
}
