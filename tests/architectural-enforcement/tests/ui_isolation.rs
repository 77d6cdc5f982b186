//! Integration Test: UI Isolation
//!
//! **Policy 1**: `journal-core` is UI-agnostic. Production code under
//! `journal/core/src` MUST NOT reference ratatui, crossterm, or any other
//! terminal machinery.
//!
//! **Policy 2**: Views are pure projections. Production code under
//! `tui/src/views` MUST NOT issue network calls or mutate the core; it only
//! reads state and draws.

use std::fs;
use std::path::{Path, PathBuf};

/// Substrings forbidden in core production code.
const CORE_FORBIDDEN: &[&str] = &["ratatui", "crossterm", "::Terminal", "EventStream"];

/// Substrings forbidden in view production code.
const VIEW_FORBIDDEN: &[&str] = &["reqwest", "handle_event", "core_mut", "tokio::spawn"];

#[test]
fn test_core_has_no_ui_dependencies() {
    let violations = find_violations(&workspace_path("journal/core/src"), CORE_FORBIDDEN);

    assert!(
        violations.is_empty(),
        "\nUI machinery found in journal-core production code:\n{}\n\
         The core must stay renderable by any surface.\n",
        violations.join("\n")
    );
}

#[test]
fn test_views_are_effect_free() {
    let violations = find_violations(&workspace_path("tui/src/views"), VIEW_FORBIDDEN);

    assert!(
        violations.is_empty(),
        "\nEffects found in view code:\n{}\n\
         Views render state; the App event loop owns all effects.\n",
        violations.join("\n")
    );
}

fn workspace_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

fn find_violations(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };

        let mut in_tests = false;
        for (line_no, line) in content.lines().enumerate() {
            // Skip #[cfg(test)] modules: test code may do what it likes
            if line.contains("#[cfg(test)]") {
                in_tests = true;
            }
            if in_tests {
                continue;
            }
            // Comments and docs may name the forbidden things
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }

            for needle in forbidden {
                if line.contains(needle) {
                    violations.push(format!(
                        "  {}:{}: {}",
                        entry.path().display(),
                        line_no + 1,
                        line.trim()
                    ));
                }
            }
        }
    }

    violations
}
