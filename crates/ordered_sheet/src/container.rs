//! The live rule container capability and the containers shipped with it.
//!
//! A container is a flat, ordered, insert-only list of materialized rules.
//! The ordered sheet never removes rules and never reorders them; it only
//! inserts at a position and reads back what is there.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Why a container refused a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertRejected {
    OutOfBounds { position: usize, len: usize },
    /// The text has no `{ ... }` block.
    Malformed,
    /// The selector uses syntax the container does not support.
    Unsupported { fragment: String },
}

impl fmt::Display for InsertRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertRejected::OutOfBounds { position, len } => {
                write!(f, "position {position} is past the end of {len} rules")
            }
            InsertRejected::Malformed => write!(f, "rule has no declaration block"),
            InsertRejected::Unsupported { fragment } => {
                write!(f, "unsupported selector syntax {fragment:?}")
            }
        }
    }
}

impl std::error::Error for InsertRejected {}

/// Ordered rule list the sheet keeps in sync with its bookkeeping.
pub trait RuleContainer {
    /// Number of materialized rules.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of the rule at `index`.
    fn rule_text(&self, index: usize) -> Option<String>;

    /// Selector of the rule at `index`.
    ///
    /// Hosts that keep a parsed selector can return it directly; the default
    /// derives it from the rule text.
    fn selector_text(&self, index: usize) -> Option<String> {
        self.rule_text(index)
            .and_then(|text| css::selector_text(&text))
    }

    /// Insert `text` so that it ends up at `position`. Failure leaves the
    /// container untouched.
    fn insert_rule(&mut self, text: &str, position: usize) -> Result<(), InsertRejected>;
}

/// In-memory rule container.
///
/// Accepts any text that carries a `{ ... }` block, except rules whose
/// selector contains one of the configured unsupported fragments. That is
/// enough to reproduce hosts that refuse selectors they cannot parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleList {
    rules: Vec<String>,
    unsupported: Vec<String>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container that already holds `rules`, e.g. server-rendered output.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            unsupported: Vec::new(),
        }
    }

    /// Container holding one rule per non-blank line of `text`, which is the
    /// shape [`OrderedSheet::text_content`](crate::OrderedSheet::text_content)
    /// produces.
    pub fn from_text(text: &str) -> Self {
        Self::from_rules(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Reject rules whose selector contains `fragment`.
    pub fn reject_selectors_containing(mut self, fragment: impl Into<String>) -> Self {
        self.unsupported.push(fragment.into());
        self
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// The rules joined with newlines, in container order.
    pub fn to_text(&self) -> String {
        self.rules.join("\n")
    }

    fn check(&self, text: &str) -> Result<(), InsertRejected> {
        let trimmed = text.trim();
        if !trimmed.contains('{') || !trimmed.ends_with('}') {
            return Err(InsertRejected::Malformed);
        }
        let Some(selector) = css::selector_text(trimmed) else {
            return Ok(());
        };
        match self
            .unsupported
            .iter()
            .find(|fragment| selector.contains(fragment.as_str()))
        {
            Some(fragment) => Err(InsertRejected::Unsupported {
                fragment: fragment.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl RuleContainer for RuleList {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn rule_text(&self, index: usize) -> Option<String> {
        self.rules.get(index).cloned()
    }

    fn insert_rule(&mut self, text: &str, position: usize) -> Result<(), InsertRejected> {
        if position > self.rules.len() {
            return Err(InsertRejected::OutOfBounds {
                position,
                len: self.rules.len(),
            });
        }
        self.check(text)?;
        self.rules.insert(position, text.to_string());
        Ok(())
    }
}

/// Shared handle to one physical container.
///
/// Cloning the handle does not clone the container, so a forked sheet that
/// holds a clone keeps writing into the same rule list as its origin.
/// Single-threaded by construction.
#[derive(Debug, Default)]
pub struct SharedContainer<C>(Rc<RefCell<C>>);

impl<C> SharedContainer<C> {
    pub fn new(container: C) -> Self {
        Self(Rc::new(RefCell::new(container)))
    }

    pub fn borrow(&self) -> Ref<'_, C> {
        self.0.borrow()
    }
}

impl<C> Clone for SharedContainer<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C: RuleContainer> RuleContainer for SharedContainer<C> {
    fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn rule_text(&self, index: usize) -> Option<String> {
        self.0.borrow().rule_text(index)
    }

    fn selector_text(&self, index: usize) -> Option<String> {
        self.0.borrow().selector_text(index)
    }

    fn insert_rule(&mut self, text: &str, position: usize) -> Result<(), InsertRejected> {
        self.0.borrow_mut().insert_rule(text, position)
    }
}
