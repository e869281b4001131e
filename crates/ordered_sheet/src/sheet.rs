//! The ordered rule index.
//!
//! Rules are filed under integer groups. Groups are laid out in ascending
//! order in one flat container, each introduced by a marker rule, and a rule
//! is always materialized right before the next group's marker (or at the end
//! when there is no later placed group). Selectors are deduplicated across all
//! groups for the lifetime of the sheet.

use crate::container::{InsertRejected, RuleContainer, RuleList};
use crate::group::Group;
use css::{encode_group_rule, selector_text};
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound::{Excluded, Unbounded};

/// What [`OrderedSheet::insert`] did with a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    /// The selector was already committed; nothing changed.
    Duplicate,
    /// The container refused the rule; bookkeeping was rolled back.
    Rejected,
}

/// Ordered, deduplicating index over an optional live container.
///
/// Without a container the sheet is a plain ledger, which is what build-time
/// extraction uses.
///
/// # Example
///
/// ```
/// use ordered_sheet::OrderedSheet;
///
/// let mut sheet = OrderedSheet::new();
/// sheet.insert(".b{color:blue}", 1);
/// sheet.insert(".a{color:red}", 0);
///
/// assert_eq!(
///     sheet.text_content(),
///     "[stylesheet-group=\"0\"]{}\n.a{color:red}\n[stylesheet-group=\"1\"]{}\n.b{color:blue}"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct OrderedSheet<C = RuleList> {
    pub(crate) groups: BTreeMap<i32, Group>,
    pub(crate) selectors: HashSet<String>,
    pub(crate) container: Option<C>,
}

impl OrderedSheet {
    /// Detached sheet with no live container.
    pub fn new() -> Self {
        Self::detached()
    }
}

impl Default for OrderedSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RuleContainer> OrderedSheet<C> {
    /// Detached sheet for any container type.
    pub fn detached() -> Self {
        Self {
            groups: BTreeMap::new(),
            selectors: HashSet::new(),
            container: None,
        }
    }

    /// Insert `css_text` into `group`.
    ///
    /// Opens the group first if needed. Duplicate selectors are a silent
    /// no-op; a container rejection rolls the rule back out of the
    /// bookkeeping, selector included, so a later retry is not blocked.
    pub fn insert(&mut self, css_text: &str, group: i32) -> Insertion {
        self.open_group(group);

        let selector = selector_text(css_text);
        if selector
            .as_ref()
            .is_some_and(|selector| self.selectors.contains(selector))
        {
            return Insertion::Duplicate;
        }

        let Some(entry) = self.groups.get_mut(&group) else {
            return Insertion::Rejected;
        };
        let at = entry.insert_sorted(css_text);
        if let Some(selector) = &selector {
            self.selectors.insert(selector.clone());
        }

        if let Err(rejected) = self.materialize(group, css_text) {
            log::debug!(
                target: "ordered_sheet",
                "group {group}: container rejected {css_text:?}: {rejected}"
            );
            if let Some(entry) = self.groups.get_mut(&group) {
                entry.remove_at(at);
            }
            if let Some(selector) = &selector {
                self.selectors.remove(selector);
            }
            return Insertion::Rejected;
        }
        Insertion::Inserted
    }

    /// Make sure `group` exists, materializing its marker if it is new.
    pub(crate) fn open_group(&mut self, group: i32) {
        if self.groups.contains_key(&group) {
            return;
        }
        let marker = encode_group_rule(group);
        self.groups.insert(group, Group::new(marker.clone()));
        if let Err(rejected) = self.materialize(group, &marker) {
            log::warn!(
                target: "ordered_sheet",
                "group {group}: container rejected marker: {rejected}"
            );
        }
    }

    /// Write `text` into the live container right before the next group.
    fn materialize(&mut self, group: i32, text: &str) -> Result<(), InsertRejected> {
        let Some(container) = self.container.as_mut() else {
            return Ok(());
        };
        let position = self
            .groups
            .range((Excluded(group), Unbounded))
            .next()
            .and_then(|(_, next)| next.start())
            .unwrap_or_else(|| container.len());

        container.insert_rule(text, position)?;
        log::trace!(target: "ordered_sheet", "group {group}: materialized at {position}");

        if let Some(entry) = self.groups.get_mut(&group) {
            entry.set_start_if_unset(position);
        }
        for (_, later) in self.groups.range_mut((Excluded(group), Unbounded)) {
            later.shift();
        }
        Ok(())
    }

    /// Every group, ascending: its marker then its sorted rules, one per
    /// line. Only reads bookkeeping.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut first = true;
        for line in self.groups.values().flat_map(Group::lines) {
            if !first {
                out.push('\n');
            }
            out.push_str(line);
            first = false;
        }
        out
    }

    /// Independent copy of the bookkeeping.
    ///
    /// The fork keeps a clone of the container handle: with a
    /// [`SharedContainer`](crate::SharedContainer) both sheets keep writing
    /// into the same physical rule list, while their group and selector
    /// state evolve separately from here on.
    pub fn duplicate(&self) -> Self
    where
        C: Clone,
    {
        self.clone()
    }

    /// Known groups, ascending.
    pub fn groups(&self) -> impl Iterator<Item = i32> + '_ {
        self.groups.keys().copied()
    }

    pub fn group(&self, group: i32) -> Option<&Group> {
        self.groups.get(&group)
    }

    /// Container position of `group`'s marker, once materialized.
    pub fn group_start(&self, group: i32) -> Option<usize> {
        self.groups.get(&group).and_then(Group::start)
    }

    /// Real rules in serialized order, markers left out.
    pub fn rules(&self) -> impl Iterator<Item = (i32, &str)> + '_ {
        self.groups.iter().flat_map(|(&group, entry)| {
            entry.rules().iter().map(move |rule| (group, rule.as_str()))
        })
    }

    /// Returns `true` if `selector` was committed into any group.
    pub fn has_selector(&self, selector: &str) -> bool {
        self.selectors.contains(selector)
    }

    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    /// Consume the sheet and hand back its live container.
    pub fn into_container(self) -> Option<C> {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SharedContainer;

    fn marker(group: i32) -> String {
        encode_group_rule(group)
    }

    fn attached<C: RuleContainer>(container: C) -> OrderedSheet<C> {
        OrderedSheet::with_container(container).unwrap()
    }

    #[test]
    fn serializes_groups_in_ascending_order() {
        let mut sheet = OrderedSheet::new();
        sheet.insert(".a{color:red}", 0);
        sheet.insert(".b{color:blue}", 1);
        sheet.insert(".c{color:green}", 0);

        let expected = [
            marker(0),
            ".a{color:red}".to_string(),
            ".c{color:green}".to_string(),
            marker(1),
            ".b{color:blue}".to_string(),
        ]
        .join("\n");
        assert_eq!(sheet.text_content(), expected);
    }

    #[test]
    fn empty_sheet_serializes_to_nothing() {
        assert_eq!(OrderedSheet::new().text_content(), "");
    }

    #[test]
    fn duplicate_selector_is_a_no_op() {
        let mut sheet = OrderedSheet::new();
        assert_eq!(sheet.insert(".a{color:red}", 0), Insertion::Inserted);
        assert_eq!(sheet.insert(".a{color:blue}", 2), Insertion::Duplicate);
        assert_eq!(sheet.insert(" .a { color: red } ", 0), Insertion::Duplicate);
        // Group 2 was still opened.
        assert_eq!(sheet.groups().collect::<Vec<_>>(), [0, 2]);
        assert_eq!(sheet.rules().count(), 1);
    }

    #[test]
    fn comma_spacing_does_not_defeat_dedup() {
        let mut sheet = OrderedSheet::new();
        sheet.insert(".a,.b{color:red}", 0);
        assert_eq!(sheet.insert(".a , .b{color:red}", 0), Insertion::Duplicate);
        assert!(sheet.has_selector(".a,.b"));
    }

    #[test]
    fn empty_selectors_are_not_tracked() {
        let mut sheet = OrderedSheet::new();
        assert_eq!(sheet.insert("{color:red}", 0), Insertion::Inserted);
        assert_eq!(sheet.insert("{color:red}", 0), Insertion::Inserted);
        assert_eq!(sheet.selector_count(), 0);
        assert_eq!(sheet.group(0).unwrap().rules().len(), 2);
    }

    #[test]
    fn places_rules_before_the_next_group() {
        let mut sheet = attached(RuleList::new());
        sheet.insert(".b{}", 1);
        sheet.insert(".a{}", 0);
        sheet.insert(".c{}", 2);
        sheet.insert(".a2{}", 0);

        let container = sheet.container().unwrap();
        assert_eq!(
            container.rules(),
            [
                marker(0),
                ".a{}".to_string(),
                ".a2{}".to_string(),
                marker(1),
                ".b{}".to_string(),
                marker(2),
                ".c{}".to_string(),
            ]
        );
        assert_eq!(sheet.group_start(0), Some(0));
        assert_eq!(sheet.group_start(1), Some(3));
        assert_eq!(sheet.group_start(2), Some(5));
    }

    #[test]
    fn insert_shifts_later_groups() {
        let existing = (0..10)
            .map(|i| {
                if i == 0 {
                    marker(1)
                } else {
                    format!(".r{i}{{}}")
                }
            })
            .chain([marker(5)]);
        let mut sheet = OrderedSheet::with_container(RuleList::from_rules(existing)).unwrap();
        assert_eq!(sheet.group_start(5), Some(10));

        sheet.insert(".new{}", 1);
        assert_eq!(sheet.group_start(1), Some(0));
        assert_eq!(sheet.group_start(5), Some(11));
        assert_eq!(sheet.container().unwrap().rule_text(10).as_deref(), Some(".new{}"));
    }

    #[test]
    fn rejected_rule_is_fully_rolled_back() {
        let list = RuleList::new().reject_selectors_containing(":-moz-");
        let mut sheet = attached(list);
        sheet.insert(".z{}", 3);

        assert_eq!(
            sheet.insert(".a:-moz-focusring{outline:none}", 0),
            Insertion::Rejected
        );
        assert!(!sheet.has_selector(".a:-moz-focusring"));
        assert!(sheet.group(0).unwrap().rules().is_empty());
        // Only the marker of group 0 went in, so group 3 moved by one.
        assert_eq!(sheet.group_start(0), Some(0));
        assert_eq!(sheet.group_start(3), Some(1));
        assert_eq!(sheet.container().unwrap().len(), 3);
    }

    #[test]
    fn selector_of_a_rejected_rule_can_be_retried() {
        let mut sheet = attached(RuleList::new());
        sheet.insert(".b{}", 0);
        let len = sheet.container().unwrap().len();

        // No declaration block, so the container refuses it.
        assert_eq!(sheet.insert(".a", 0), Insertion::Rejected);
        assert!(!sheet.has_selector(".a"));
        assert_eq!(sheet.container().unwrap().len(), len);

        assert_eq!(sheet.insert(".a{color:red}", 0), Insertion::Inserted);
        assert!(sheet.has_selector(".a"));
        assert_eq!(sheet.container().unwrap().len(), len + 1);
        assert_eq!(sheet.group(0).unwrap().rules(), [".a{color:red}", ".b{}"]);
    }

    #[test]
    fn rejected_marker_leaves_start_unset_until_a_rule_lands() {
        let list = RuleList::new().reject_selectors_containing("stylesheet-group=\"7\"");
        let mut sheet = attached(list);
        sheet.insert(".a{}", 7);
        assert_eq!(sheet.group_start(7), Some(0));
        assert_eq!(sheet.container().unwrap().rules(), [".a{}"]);
    }

    #[test]
    fn fork_has_independent_bookkeeping() {
        let mut sheet = OrderedSheet::new();
        sheet.insert(".a{}", 0);
        let before = sheet.text_content();

        let mut fork = sheet.duplicate();
        fork.insert(".b{}", 0);
        fork.insert(".c{}", 4);

        assert_eq!(sheet.text_content(), before);
        assert!(!sheet.has_selector(".b"));
        assert_eq!(fork.rules().count(), 3);
        // The original can still commit a selector the fork already has.
        assert_eq!(sheet.insert(".b{}", 0), Insertion::Inserted);
    }

    #[test]
    fn fork_writes_into_the_shared_container() {
        let shared = SharedContainer::new(RuleList::new());
        let mut sheet = attached(shared.clone());
        sheet.insert(".a{}", 0);

        let mut fork = sheet.duplicate();
        fork.insert(".b{}", 0);

        assert_eq!(shared.borrow().rules(), [marker(0), ".a{}".to_string(), ".b{}".to_string()]);
        assert_eq!(sheet.text_content(), [marker(0), ".a{}".to_string()].join("\n"));
    }
}
