pub type RequestId = u64;

/// Render pass that owns a fork of the global sheet.
pub type PassId = u64;

/// Attachment point of a mirrored sheet (document or shadow root).
pub type RootId = u64;

/// Where a runtime request is answered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetScope {
    Global,
    Pass(PassId),
}
