//! Replaying fixtures against the real sheet.

use crate::fixture::SheetFixture;
use ordered_sheet::invariants::check_invariants;
use ordered_sheet::{OrderedSheet, RuleContainer, RuleList};

/// Build the fixture's container and run its inserts, checking invariants
/// after every step.
pub fn replay(fixture: &SheetFixture) -> OrderedSheet<RuleList> {
    let mut sheet = if fixture.detached {
        OrderedSheet::new()
    } else {
        let mut container = RuleList::from_rules(fixture.prefilled.iter().cloned());
        for fragment in &fixture.reject {
            container = container.reject_selectors_containing(fragment.clone());
        }
        OrderedSheet::with_container(container).unwrap_or_else(|err| {
            panic!("fixture {:?}: hydration failed: {err}", fixture.name)
        })
    };
    assert_invariants(&sheet, &format!("{} (hydrated)", fixture.name));
    for (i, step) in fixture.inserts.iter().enumerate() {
        sheet.insert(&step.rule, step.group);
        assert_invariants(&sheet, &format!("{} (after insert {i})", fixture.name));
    }
    sheet
}

#[track_caller]
pub fn assert_invariants<C: RuleContainer>(sheet: &OrderedSheet<C>, context: &str) {
    if let Err(violation) = check_invariants(sheet) {
        panic!("{context}: {violation}");
    }
}
