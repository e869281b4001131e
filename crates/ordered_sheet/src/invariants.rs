//! Structural checks over a sheet's bookkeeping and its container.
//!
//! Used by unit tests, integration tests and the fuzz target.

use crate::container::RuleContainer;
use crate::sheet::OrderedSheet;
use css::{decode_group_rule, selector_text};
use std::collections::HashSet;

/// Verify the bookkeeping is self-consistent and agrees with the container.
///
/// Returns a description of the first violation found.
pub fn check_invariants<C: RuleContainer>(sheet: &OrderedSheet<C>) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut previous_start: Option<(i32, usize)> = None;

    for (&group, entry) in &sheet.groups {
        if decode_group_rule(entry.marker()) != Some(group) {
            return Err(format!(
                "group {group}: marker {:?} does not encode it",
                entry.marker()
            ));
        }
        if entry.rules().windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(format!("group {group}: rules are not sorted"));
        }
        for rule in entry.rules() {
            let Some(selector) = selector_text(rule) else {
                continue;
            };
            if !sheet.selectors.contains(&selector) {
                return Err(format!("group {group}: selector {selector:?} is not registered"));
            }
            if !seen.insert(selector.clone()) {
                return Err(format!("selector {selector:?} is filed more than once"));
            }
        }

        let (Some(container), Some(start)) = (sheet.container.as_ref(), entry.start()) else {
            continue;
        };
        if let Some((before, before_start)) = previous_start {
            if before_start >= start {
                return Err(format!(
                    "group {group} starts at {start}, not after group {before} at {before_start}"
                ));
            }
        }
        previous_start = Some((group, start));
        let at_start = container.rule_text(start);
        let encodes_group = at_start.as_deref().and_then(decode_group_rule) == Some(group);
        // A group whose marker was rejected starts at its first real rule.
        let is_own_rule = at_start
            .as_deref()
            .is_some_and(|text| entry.rules().iter().any(|rule| rule == text));
        if !encodes_group && !is_own_rule {
            return Err(format!(
                "group {group}: container holds {at_start:?} at start {start}"
            ));
        }
    }

    for phantom in sheet.selectors.iter().filter(|s| !seen.contains(*s)) {
        if !hydrated_only(sheet, phantom) {
            return Err(format!("selector {phantom:?} is registered but not filed"));
        }
    }
    Ok(())
}

// Hydration registers the selector a host reports, which may differ in
// spacing from the one derived from the rule text.
fn hydrated_only<C: RuleContainer>(sheet: &OrderedSheet<C>, selector: &str) -> bool {
    let Some(container) = sheet.container.as_ref() else {
        return false;
    };
    (0..container.len()).any(|i| {
        container
            .selector_text(i)
            .and_then(|raw| selector_text(&raw))
            .as_deref()
            == Some(selector)
    })
}
