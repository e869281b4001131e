//! String-level helpers for opaque CSS rule text.
//!
//! Nothing in here parses CSS. Rules are treated as `selector { body }`
//! strings and only the pieces the ordered sheet needs are extracted:
//! the selector used as a dedup key, the group marker encoding, and the
//! boundaries of complete rule blocks in a streamed style sheet.

mod group;
mod marker;
mod selector;
mod splitter;

pub use group::{GroupError, parse_group};
pub use marker::{MARKER_ATTRIBUTE, decode_group_rule, encode_group_rule, is_group_rule};
pub use selector::selector_text;
pub use splitter::RuleSplitter;
