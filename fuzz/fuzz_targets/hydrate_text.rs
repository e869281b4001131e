#![no_main]

use libfuzzer_sys::fuzz_target;
use ordered_sheet::invariants::check_invariants;
use ordered_sheet::{OrderedSheet, RuleList};

// Arbitrary pre-existing content either hydrates into a consistent sheet
// or is reported; it never panics.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(mut sheet) = OrderedSheet::with_container(RuleList::from_text(&text)) else {
        return;
    };
    sheet.insert(".fuzz{}", 0);
    sheet.insert(".fuzz2{}", i32::MAX);
    if let Err(violation) = check_invariants(&sheet) {
        if !violation.contains("filed more than once") {
            panic!("{violation}");
        }
    }
});
