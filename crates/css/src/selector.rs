use memchr::memchr;

// input: ".a , .b { color: red }"
// output: Some(".a,.b")
/// Derive the key a rule is deduplicated by.
///
/// Everything before the first `{`, trimmed, with whitespace around commas
/// removed. Returns `None` when nothing is left, in which case the rule is
/// never tracked for dedup.
pub fn selector_text(rule: &str) -> Option<String> {
    let head = match memchr(b'{', rule.as_bytes()) {
        Some(open) => &rule[..open],
        None => rule,
    };
    let head = head.trim();
    if head.is_empty() {
        return None;
    }
    Some(collapse_comma_whitespace(head))
}

fn collapse_comma_whitespace(selector: &str) -> String {
    if memchr(b',', selector.as_bytes()).is_none() {
        return selector.to_string();
    }
    let mut out = String::with_capacity(selector.len());
    for (i, part) in selector.split(',').enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(part.trim());
    }
    out
}
