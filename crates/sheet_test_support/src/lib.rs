//! Shared helpers for sheet golden tests: readable line diffs and TOML
//! fixture loading. With the `sheet` feature, fixtures can also be replayed
//! against an `ordered_sheet::OrderedSheet`.

pub mod fixture;

#[cfg(feature = "sheet")]
pub mod replay;

pub use fixture::{InsertStep, SheetFixture, load_fixture, load_fixtures};

/// Describe the first difference between two multi-line texts.
///
/// Returns `None` when they are identical.
pub fn diff_text(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();
    let max = expected.len().max(actual.len());
    let first = (0..max)
        .find(|&i| expected.get(i) != actual.get(i))
        .unwrap_or(max);

    use std::fmt::Write;
    let mut out = String::new();
    let from = first.saturating_sub(2);
    let to = (first + 3).min(max);
    let _ = writeln!(&mut out, "first difference at line {}:", first + 1);
    for i in from..to {
        let marker = if i == first { ">" } else { " " };
        let left = expected.get(i).copied().unwrap_or("<missing>");
        let right = actual.get(i).copied().unwrap_or("<missing>");
        let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", i + 1);
        let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", i + 1);
    }
    if first == max {
        // Same lines, different line endings or trailing newline.
        let _ = writeln!(&mut out, "texts differ only in line terminators");
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    Some(out)
}

/// Panic with a line diff if `actual` differs from `expected`.
#[track_caller]
pub fn assert_text_eq(context: &str, expected: &str, actual: &str) {
    if let Some(diff) = diff_text(expected, actual) {
        panic!("{context}: text mismatch\n{diff}");
    }
}
