//! # ordered_sheet
//!
//! An ordered, deduplicating, hydratable index over a flat rule container.
//!
//! - [`OrderedSheet`]: rules filed under integer groups, groups laid out in
//!   ascending order, selectors deduplicated, deterministic text output
//! - [`RuleContainer`]: the live container capability, with [`RuleList`] as
//!   the in-memory implementation and [`SharedContainer`] for forks that
//!   keep writing into the same container
//! - [`StyleRegistry`]: the current sheet, constructed on first use and
//!   reset between renders
//! - [`SheetSet`]: one logical sheet mirrored into several roots
//!
//! Everything here is single-threaded. Cross-thread access goes through the
//! `runtime_css` crate, which owns a registry on its own thread.

mod container;
mod error;
mod group;
mod hydrate;
mod registry;
mod sheet;
mod sheet_set;

#[cfg(any(test, feature = "test-harness"))]
pub mod invariants;

pub use container::{InsertRejected, RuleContainer, RuleList, SharedContainer};
pub use error::HydrateError;
pub use group::Group;
pub use registry::{SHEET_ID, SheetSnapshot, StyleRegistry};
pub use sheet::{Insertion, OrderedSheet};
pub use sheet_set::SheetSet;

// Group numbers arriving as text go through the same strict parser.
pub use css::{GroupError, parse_group};
