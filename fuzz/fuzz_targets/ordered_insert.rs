#![no_main]

use libfuzzer_sys::fuzz_target;
use ordered_sheet::invariants::check_invariants;
use ordered_sheet::{OrderedSheet, RuleList};

const SELECTORS: [&str; 8] = [".a", ".b", ".a,.b", ".c:hover", "::-x-odd", "*", "", ".d .e"];

// Every 2 bytes are one insert: group, then selector and body.
fuzz_target!(|data: &[u8]| {
    let list = RuleList::new().reject_selectors_containing("::-x-");
    let Ok(mut sheet) = OrderedSheet::with_container(list) else {
        return;
    };
    let mut ledger = OrderedSheet::new();

    for pair in data.chunks_exact(2).take(256) {
        let group = (pair[0] % 7) as i32 - 3;
        let selector = SELECTORS[(pair[1] & 0x07) as usize];
        let rule = format!("{selector}{{order:{}}}", pair[1] >> 3);
        sheet.insert(&rule, group);
        ledger.insert(&rule, group);
        if let Err(violation) = check_invariants(&sheet) {
            panic!("{violation}");
        }
    }

    let text = sheet.text_content();
    let Some(container) = sheet.into_container() else {
        return;
    };
    let rehydrated = match OrderedSheet::with_container(container) {
        Ok(rehydrated) => rehydrated,
        Err(err) => panic!("own container failed to hydrate: {err}"),
    };
    assert_eq!(rehydrated.text_content(), text);

    // The detached ledger never rejects, so it holds every line the
    // attached sheet does.
    let ledger_text = ledger.text_content();
    let ledger_lines: std::collections::HashSet<&str> = ledger_text.lines().collect();
    for line in text.lines() {
        assert!(ledger_lines.contains(line), "ledger is missing {line:?}");
    }
});
