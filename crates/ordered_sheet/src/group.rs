/// Bookkeeping for one priority group.
///
/// The marker is kept apart from the real rules; serialization emits it
/// first. Real rules are kept sorted so output does not depend on arrival
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    start: Option<usize>,
    marker: String,
    rules: Vec<String>,
}

impl Group {
    pub(crate) fn new(marker: String) -> Self {
        Self {
            start: None,
            marker,
            rules: Vec::new(),
        }
    }

    pub(crate) fn hydrated(marker: String, start: usize) -> Self {
        Self {
            start: Some(start),
            marker,
            rules: Vec::new(),
        }
    }

    /// Position of the marker in the live container, once materialized.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Real rules, sorted.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub(crate) fn set_start_if_unset(&mut self, position: usize) {
        if self.start.is_none() {
            self.start = Some(position);
        }
    }

    pub(crate) fn shift(&mut self) {
        if let Some(start) = self.start.as_mut() {
            *start += 1;
        }
    }

    /// Insert keeping the rules sorted; returns the index it landed at.
    pub(crate) fn insert_sorted(&mut self, rule: &str) -> usize {
        let at = match self.rules.binary_search_by(|r| r.as_str().cmp(rule)) {
            Ok(i) | Err(i) => i,
        };
        self.rules.insert(at, rule.to_string());
        at
    }

    pub(crate) fn remove_at(&mut self, index: usize) {
        self.rules.remove(index);
    }

    /// Hydration appends in container order and sorts once at the end.
    pub(crate) fn push_unsorted(&mut self, rule: String) {
        self.rules.push(rule);
    }

    pub(crate) fn sort_rules(&mut self) {
        self.rules.sort_unstable();
    }

    /// Marker followed by the rules.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.marker.as_str()).chain(self.rules.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_rules_sorted_after_marker() {
        let mut g = Group::new("[m]{}".to_string());
        g.insert_sorted(".c{}");
        g.insert_sorted(".a{}");
        g.insert_sorted(".b{}");
        assert_eq!(g.lines().collect::<Vec<_>>(), ["[m]{}", ".a{}", ".b{}", ".c{}"]);
    }

    #[test]
    fn shift_only_moves_known_starts() {
        let mut unplaced = Group::new("[m]{}".to_string());
        unplaced.shift();
        assert_eq!(unplaced.start(), None);

        let mut placed = Group::hydrated("[m]{}".to_string(), 10);
        placed.shift();
        assert_eq!(placed.start(), Some(11));
        placed.set_start_if_unset(3);
        assert_eq!(placed.start(), Some(11));
    }

    #[test]
    fn remove_reverts_insert() {
        let mut g = Group::new("[m]{}".to_string());
        g.insert_sorted(".a{}");
        let at = g.insert_sorted(".0{}");
        g.remove_at(at);
        assert_eq!(g.rules(), [".a{}"]);
    }
}
