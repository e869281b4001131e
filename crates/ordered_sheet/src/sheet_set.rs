//! One logical sheet mirrored into several roots.
//!
//! A document and its shadow roots each need their own copy of the rules.
//! The first root attached is the primary; every root attached after it is
//! caught up by replaying the primary's groups, and every insert goes to
//! all roots.

use crate::container::RuleContainer;
use crate::error::HydrateError;
use crate::sheet::{Insertion, OrderedSheet};
use core_types::RootId;

pub struct SheetSet<C: RuleContainer> {
    roots: Vec<(RootId, OrderedSheet<C>)>,
}

impl<C: RuleContainer> Default for SheetSet<C> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<C: RuleContainer> SheetSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `container` as `root`.
    ///
    /// The container is hydrated, then every group and rule the primary root
    /// knows is inserted into it. Returns `Ok(false)` if `root` is already
    /// attached, leaving `container` unused.
    pub fn attach(&mut self, root: RootId, container: C) -> Result<bool, HydrateError> {
        if self.contains(root) {
            return Ok(false);
        }
        let mut sheet = OrderedSheet::with_container(container)?;
        if let Some((_, primary)) = self.roots.first() {
            for group in primary.groups() {
                sheet.open_group(group);
            }
            for (group, rule) in primary.rules() {
                sheet.insert(rule, group);
            }
        }
        log::debug!(target: "ordered_sheet", "attached root {root}");
        self.roots.push((root, sheet));
        Ok(true)
    }

    /// Stop mirroring into `root` and hand back its sheet.
    pub fn detach(&mut self, root: RootId) -> Option<OrderedSheet<C>> {
        let at = self.roots.iter().position(|(id, _)| *id == root)?;
        Some(self.roots.remove(at).1)
    }

    pub fn contains(&self, root: RootId) -> bool {
        self.roots.iter().any(|(id, _)| *id == root)
    }

    pub fn get(&self, root: RootId) -> Option<&OrderedSheet<C>> {
        self.roots
            .iter()
            .find(|(id, _)| *id == root)
            .map(|(_, sheet)| sheet)
    }

    pub fn primary(&self) -> Option<&OrderedSheet<C>> {
        self.roots.first().map(|(_, sheet)| sheet)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Insert into every root. Returns what happened in the primary root.
    pub fn insert(&mut self, css_text: &str, group: i32) -> Option<Insertion> {
        let mut primary = None;
        for (root, sheet) in &mut self.roots {
            let outcome = sheet.insert(css_text, group);
            if primary.is_none() {
                primary = Some(outcome);
            } else if Some(outcome) != primary {
                log::debug!(
                    target: "ordered_sheet",
                    "root {root} diverged on {css_text:?}: {outcome:?}"
                );
            }
        }
        primary
    }

    /// Serialized primary sheet, empty when nothing is attached.
    pub fn text_content(&self) -> String {
        self.primary()
            .map(OrderedSheet::text_content)
            .unwrap_or_default()
    }
}
