//! Rebuilding bookkeeping from a container that already holds rules.
//!
//! The container is expected to look exactly like something this crate
//! wrote: markers in ascending group order, each followed by that group's
//! rules. Anything else is a configuration error and is reported, not
//! papered over.

use crate::container::RuleContainer;
use crate::error::HydrateError;
use crate::group::Group;
use crate::sheet::OrderedSheet;
use css::{decode_group_rule, is_group_rule};

impl<C: RuleContainer> OrderedSheet<C> {
    /// Sheet attached to `container`.
    ///
    /// An empty container is simply attached. A non-empty one is scanned
    /// once: every marker opens its group at the marker's position, every
    /// other rule is filed under the group opened last and its selector is
    /// registered.
    pub fn with_container(container: C) -> Result<Self, HydrateError> {
        let mut sheet = Self::detached();
        let mut current: Option<i32> = None;

        for index in 0..container.len() {
            let Some(text) = container.rule_text(index) else {
                continue;
            };
            if is_group_rule(&text) {
                let Some(group) = decode_group_rule(&text) else {
                    return Err(HydrateError::InvalidMarker { index, text });
                };
                if sheet.groups.contains_key(&group) {
                    return Err(HydrateError::DuplicateMarker { index, group });
                }
                if let Some(previous) = current.filter(|previous| *previous > group) {
                    return Err(HydrateError::MarkerOutOfOrder {
                        index,
                        group,
                        previous,
                    });
                }
                sheet.groups.insert(group, Group::hydrated(text, index));
                current = Some(group);
                continue;
            }

            let Some(group) = current else {
                return Err(HydrateError::RuleBeforeMarker { index });
            };
            if let Some(selector) = container
                .selector_text(index)
                .and_then(|raw| css::selector_text(&raw))
            {
                sheet.selectors.insert(selector);
            }
            if let Some(entry) = sheet.groups.get_mut(&group) {
                entry.push_unsorted(text);
            }
        }

        for entry in sheet.groups.values_mut() {
            entry.sort_rules();
        }
        if !container.is_empty() {
            log::debug!(
                target: "ordered_sheet",
                "hydrated {} groups and {} selectors from {} rules",
                sheet.groups.len(),
                sheet.selectors.len(),
                container.len()
            );
        }
        sheet.container = Some(container);
        Ok(sheet)
    }
}
