//! Group marker rules.
//!
//! Every group is introduced in the flat rule list by an empty rule whose
//! selector carries the group number, e.g. `[stylesheet-group="2"]{}`.
//! Markers are what hydration keys on, so the encoding has to stay
//! byte-for-byte stable between whoever wrote a sheet and whoever reads it.

use crate::group::parse_group;
use memchr::memchr;

/// Attribute name used in marker selectors.
pub const MARKER_ATTRIBUTE: &str = "stylesheet-group";

/// Encode the marker rule for `group`.
pub fn encode_group_rule(group: i32) -> String {
    format!("[{MARKER_ATTRIBUTE}=\"{group}\"]{{}}")
}

/// Returns `true` if the rule has the shape of a group marker: an empty
/// body and a selector that is a single `stylesheet-group` attribute
/// selector with a value.
///
/// The value itself is not checked; use [`decode_group_rule`] for that.
/// Rules that merely start with the attribute, such as
/// `[stylesheet-group="1"] .a{}` or `[stylesheet-groupish]{}`, are ordinary
/// rules.
pub fn is_group_rule(rule: &str) -> bool {
    marker_value(rule).is_some()
}

/// The raw attribute value of a marker-shaped rule, quotes included.
fn marker_value(rule: &str) -> Option<&str> {
    let open = memchr(b'{', rule.as_bytes())?;
    if rule[open + 1..].trim() != "}" {
        return None;
    }
    let inner = rule[..open]
        .trim()
        .strip_prefix('[')?
        .strip_suffix(']')?
        .trim();
    if inner.contains([']', '[']) {
        return None;
    }
    let value = inner
        .strip_prefix(MARKER_ATTRIBUTE)?
        .trim_start()
        .strip_prefix('=')?
        .trim();
    (!value.is_empty()).then_some(value)
}

/// Decode the group number of a marker rule.
///
/// Tolerates the whitespace a host adds when it re-serializes a rule
/// (`[stylesheet-group="2"] { }`) and either quote style. Returns `None` for
/// anything that is not an empty marker rule with an integer group.
pub fn decode_group_rule(rule: &str) -> Option<i32> {
    let value = marker_value(rule)?;
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let number = value[1..].strip_suffix(quote)?;
    parse_group(number).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bit_exact_marker() {
        assert_eq!(encode_group_rule(0), "[stylesheet-group=\"0\"]{}");
        assert_eq!(encode_group_rule(-3), "[stylesheet-group=\"-3\"]{}");
        assert_eq!(encode_group_rule(22), "[stylesheet-group=\"22\"]{}");
    }

    #[test]
    fn decodes_what_it_encodes() {
        for group in [-7, 0, 1, 3, 40, i32::MAX] {
            assert_eq!(decode_group_rule(&encode_group_rule(group)), Some(group));
        }
    }

    #[test]
    fn decodes_host_serialized_markers() {
        assert_eq!(decode_group_rule("[stylesheet-group=\"2\"] { }"), Some(2));
        assert_eq!(decode_group_rule("[stylesheet-group='5']{}"), Some(5));
        assert_eq!(decode_group_rule("[ stylesheet-group = \"1\" ] {}"), Some(1));
    }

    #[test]
    fn rejects_non_markers() {
        assert_eq!(decode_group_rule(".a{color:red}"), None);
        assert_eq!(decode_group_rule("[stylesheet-group=\"x\"]{}"), None);
        assert_eq!(decode_group_rule("[stylesheet-group=\"1']{}"), None);
        assert_eq!(decode_group_rule("[stylesheet-group=\"1\"]{color:red}"), None);
        assert_eq!(decode_group_rule("[stylesheet-group=\"1\"]"), None);
    }

    #[test]
    fn recognizes_marker_selectors() {
        assert!(is_group_rule("[stylesheet-group=\"1\"]{}"));
        assert!(is_group_rule("[stylesheet-group=\"oops\"]{}"));
        assert!(!is_group_rule(".stylesheet-group{}"));
        assert!(!is_group_rule("[data-group=\"1\"]{}"));
    }

    #[test]
    fn rules_that_only_start_like_markers_are_ordinary() {
        for rule in [
            "[stylesheet-groupish] .a{color:red}",
            "[stylesheet-group=\"1\"] .x{color:red}",
            "[stylesheet-group=\"1\"]{color:red}",
            "[stylesheet-group]{}",
            "[stylesheet-group=\"1\"][hidden]{}",
        ] {
            assert!(!is_group_rule(rule), "{rule}");
            assert_eq!(decode_group_rule(rule), None, "{rule}");
        }
    }
}
