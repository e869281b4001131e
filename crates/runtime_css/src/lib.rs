use bus::{CoreCommand, CoreEvent};
use core_types::{PassId, RequestId, SheetScope};
use css::RuleSplitter;
use ordered_sheet::{
    OrderedSheet, RuleContainer, RuleList, SHEET_ID, SharedContainer, SheetSnapshot,
    StyleRegistry,
};
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

type Live = SharedContainer<RuleList>;

struct CssStream {
    group: i32,
    splitter: RuleSplitter,
}

/// Sheet state owned by the runtime thread.
///
/// The global sheet lives in a registry over one shared live container;
/// every render pass works on a fork that writes into that same container.
struct CssRuntime {
    registry: StyleRegistry<Live>,
    /// Detached stand-in while the factory's container fails to hydrate.
    fallback: Option<StyleRegistry<Live>>,
    passes: HashMap<PassId, OrderedSheet<Live>>,
    streams: HashMap<RequestId, CssStream>,
    evt_tx: Sender<CoreEvent>,
}

/// Spawn the sheet runtime over an empty in-memory container.
pub fn start_css_runtime(cmd_rx: Receiver<CoreCommand>, evt_tx: Sender<CoreEvent>) -> JoinHandle<()> {
    start_css_runtime_with(cmd_rx, evt_tx, RuleList::new)
}

/// Spawn the sheet runtime. `make_container` is called for the first sheet
/// and again after every reset; a container that already holds rules is
/// hydrated. If hydration fails the runtime reports it and runs detached
/// until the next reset tries the factory again.
pub fn start_css_runtime_with<F>(
    cmd_rx: Receiver<CoreCommand>,
    evt_tx: Sender<CoreEvent>,
    mut make_container: F,
) -> JoinHandle<()>
where
    F: FnMut() -> RuleList + Send + 'static,
{
    thread::spawn(move || {
        let mut runtime = CssRuntime {
            registry: StyleRegistry::with_factory(move || SharedContainer::new(make_container())),
            fallback: None,
            passes: HashMap::new(),
            streams: HashMap::new(),
            evt_tx,
        };
        while let Ok(cmd) = cmd_rx.recv() {
            runtime.handle(cmd);
        }
        log::debug!(target: "runtime_css", "command channel closed, stopping");
    })
}

impl CssRuntime {
    fn handle(&mut self, cmd: CoreCommand) {
        match cmd {
            CoreCommand::InsertRule {
                scope,
                group,
                css_text,
            } => {
                let Some(sheet) = self.sheet_for(scope) else {
                    log::warn!(target: "runtime_css", "insert into unknown {scope:?} ignored");
                    return;
                };
                let outcome = sheet.insert(&css_text, group);
                self.emit(CoreEvent::RuleInserted {
                    scope,
                    group,
                    css_text,
                    outcome,
                });
            }
            CoreCommand::CssChunk {
                request_id,
                group,
                bytes,
            } => {
                let stream = self.streams.entry(request_id).or_insert_with(|| CssStream {
                    group,
                    splitter: RuleSplitter::new(),
                });
                if stream.group != group {
                    log::warn!(
                        target: "runtime_css",
                        "request {request_id}: chunk for group {group} ignored, stream files into group {}",
                        stream.group
                    );
                }
                let group = stream.group;
                let blocks = stream.splitter.push_bytes(&bytes);
                for css_block in blocks {
                    let Some(sheet) = self.sheet_for(SheetScope::Global) else {
                        return;
                    };
                    let outcome = sheet.insert(&css_block, group);
                    self.emit(CoreEvent::CssParsedBlock {
                        request_id,
                        css_block,
                        outcome,
                    });
                }
            }
            CoreCommand::CssDone { request_id } => {
                let dropped_tail = self
                    .streams
                    .remove(&request_id)
                    .and_then(|mut stream| stream.splitter.finish());
                self.emit(CoreEvent::CssSheetDone {
                    request_id,
                    dropped_tail,
                });
            }
            CoreCommand::BeginPass { pass } => {
                let Ok(fork) = self.global().fork() else {
                    return;
                };
                if self.passes.insert(pass, fork).is_some() {
                    log::warn!(target: "runtime_css", "pass {pass} restarted from the global sheet");
                }
            }
            CoreCommand::EndPass { pass } => {
                if self.passes.remove(&pass).is_none() {
                    log::warn!(target: "runtime_css", "end of unknown pass {pass}");
                }
            }
            CoreCommand::GetSheet { scope } => {
                let snapshot = match scope {
                    SheetScope::Pass(pass) if self.passes.contains_key(&pass) => {
                        self.passes.get(&pass).map(|sheet| SheetSnapshot {
                            id: SHEET_ID,
                            text_content: sheet.text_content(),
                        })
                    }
                    SheetScope::Pass(pass) => {
                        log::warn!(target: "runtime_css", "sheet of unknown pass {pass}, answering with the global sheet");
                        self.global_snapshot()
                    }
                    SheetScope::Global => self.global_snapshot(),
                };
                if let Some(snapshot) = snapshot {
                    self.emit(CoreEvent::SheetText { scope, snapshot });
                }
            }
            CoreCommand::DumpContainer => {
                let rules = self
                    .sheet_for(SheetScope::Global)
                    .and_then(|sheet| sheet.container())
                    .map(|live| live.borrow().rules().to_vec())
                    .unwrap_or_default();
                self.emit(CoreEvent::ContainerRules { rules });
            }
            CoreCommand::ResetSheet => {
                self.registry.reset();
                self.fallback = None;
                self.passes.clear();
                self.streams.clear();
                self.emit(CoreEvent::SheetReset);
            }
        }
    }

    fn sheet_for(&mut self, scope: SheetScope) -> Option<&mut OrderedSheet<Live>> {
        match scope {
            SheetScope::Global => self.global().sheet().ok(),
            SheetScope::Pass(pass) => self.passes.get_mut(&pass),
        }
    }

    fn global_snapshot(&mut self) -> Option<SheetSnapshot> {
        self.global().snapshot().ok()
    }

    /// The registry serving the global sheet, constructing it on first use.
    fn global(&mut self) -> &mut StyleRegistry<Live> {
        self.ensure_global();
        match &mut self.fallback {
            Some(fallback) => fallback,
            None => &mut self.registry,
        }
    }

    /// Construct the global sheet. If its container does not hydrate, report
    /// it and carry on with a detached sheet until the next reset.
    fn ensure_global(&mut self) {
        if self.fallback.is_some() {
            return;
        }
        let error = match self.registry.sheet() {
            Ok(sheet) => {
                if let Some(live) = sheet.container() {
                    log::trace!(target: "runtime_css", "global sheet over {} rules", live.len());
                }
                return;
            }
            Err(error) => error,
        };
        log::warn!(target: "runtime_css", "live container rejected: {error}");
        self.fallback = Some(StyleRegistry::detached());
        self.emit(CoreEvent::SheetError { error });
    }

    fn emit(&self, event: CoreEvent) {
        let _ = self.evt_tx.send(event);
    }
}
