//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code never sleeps to wait for something. The run
//! driver is paced by `tokio::time::interval`; the event loop waits on
//! events and the update queue.

use architectural_enforcement::{production_lines, report};

const FORBIDDEN: [&str; 3] = ["thread::sleep", "time::sleep", "sleep_until"];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();
    let mut scanned = 0;

    for dir in ["universe/core/src", "tui/src"] {
        let lines = production_lines(dir);
        scanned += lines.len();
        violations.extend(
            lines
                .into_iter()
                .filter(|l| FORBIDDEN.iter().any(|f| l.code.contains(f))),
        );
    }

    assert!(scanned > 0, "no production sources found");
    assert!(
        violations.is_empty(),
        "\nsleep() calls found in production code:\n{}",
        report(&violations.iter().collect::<Vec<_>>())
    );
}
