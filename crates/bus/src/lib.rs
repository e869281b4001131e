use core_types::{PassId, RequestId, SheetScope};
use ordered_sheet::{HydrateError, Insertion, SheetSnapshot};
use std::sync::mpsc::{Receiver, Sender, channel};

#[derive(Debug)]
pub enum CoreCommand {
    // Single rules
    InsertRule {
        scope: SheetScope,
        group: i32,
        css_text: String,
    },
    // Streamed style sheets, split into rules and filed under one group
    CssChunk {
        request_id: RequestId,
        group: i32,
        bytes: Vec<u8>,
    },
    CssDone {
        request_id: RequestId,
    },
    // Render passes
    BeginPass {
        pass: PassId,
    },
    EndPass {
        pass: PassId,
    },
    // Sheet lifecycle
    GetSheet {
        scope: SheetScope,
    },
    /// Rules of the live container, in container order.
    DumpContainer,
    ResetSheet,
}

#[derive(Debug)]
pub enum CoreEvent {
    RuleInserted {
        scope: SheetScope,
        group: i32,
        css_text: String,
        outcome: Insertion,
    },
    CssParsedBlock {
        request_id: RequestId,
        css_block: String,
        outcome: Insertion,
    },
    CssSheetDone {
        request_id: RequestId,
        /// Trailing text that never formed a complete rule.
        dropped_tail: Option<String>,
    },
    SheetText {
        scope: SheetScope,
        snapshot: SheetSnapshot,
    },
    ContainerRules {
        rules: Vec<String>,
    },
    SheetReset,
    /// The live container could not be hydrated; the runtime keeps going
    /// with a detached sheet.
    SheetError {
        error: HydrateError,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub cmd_rx: Receiver<CoreCommand>,
    pub evt_tx: Sender<CoreEvent>, // shareable for runtimes
    pub evt_rx: Receiver<CoreEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = channel();
        let (evt_tx, evt_rx) = channel();
        Self {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
