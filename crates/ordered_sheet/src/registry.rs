//! The process-wide "current style sheet", made explicit.
//!
//! Rendering entry points reset the sheet between renders and read its text
//! back when producing markup. Instead of a hidden global, callers own a
//! [`StyleRegistry`] and pass it to whoever needs the sheet.

use crate::container::RuleContainer;
use crate::error::HydrateError;
use crate::sheet::{Insertion, OrderedSheet};

/// Identifier rendering code gives the emitted `<style>` element.
pub const SHEET_ID: &str = "ordered-stylesheet";

/// What rendering code embeds into its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSnapshot {
    pub id: &'static str,
    pub text_content: String,
}

/// Lazily constructed current sheet.
pub struct StyleRegistry<C: RuleContainer> {
    make_container: Option<Box<dyn FnMut() -> C>>,
    current: Option<OrderedSheet<C>>,
}

impl<C: RuleContainer> StyleRegistry<C> {
    /// Registry whose sheets are plain ledgers.
    pub fn detached() -> Self {
        Self {
            make_container: None,
            current: None,
        }
    }

    /// Registry whose sheets attach to a container from `make_container`.
    /// A container that already holds rules is hydrated.
    pub fn with_factory(make_container: impl FnMut() -> C + 'static) -> Self {
        Self {
            make_container: Some(Box::new(make_container)),
            current: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// The current sheet, constructed on first use.
    pub fn sheet(&mut self) -> Result<&mut OrderedSheet<C>, HydrateError> {
        let sheet = match self.current.take() {
            Some(sheet) => sheet,
            None => self.build()?,
        };
        Ok(self.current.insert(sheet))
    }

    /// Drop the current sheet. The next use constructs a new one.
    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            log::debug!(target: "ordered_sheet", "style registry reset");
        }
    }

    pub fn insert(&mut self, css_text: &str, group: i32) -> Result<Insertion, HydrateError> {
        Ok(self.sheet()?.insert(css_text, group))
    }

    pub fn snapshot(&mut self) -> Result<SheetSnapshot, HydrateError> {
        Ok(SheetSnapshot {
            id: SHEET_ID,
            text_content: self.sheet()?.text_content(),
        })
    }

    /// Fork of the current sheet, e.g. for one render pass.
    pub fn fork(&mut self) -> Result<OrderedSheet<C>, HydrateError>
    where
        C: Clone,
    {
        Ok(self.sheet()?.duplicate())
    }

    fn build(&mut self) -> Result<OrderedSheet<C>, HydrateError> {
        match self.make_container.as_mut() {
            Some(make) => OrderedSheet::with_container(make()),
            None => Ok(OrderedSheet::detached()),
        }
    }
}

impl<C: RuleContainer> std::fmt::Debug for StyleRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("attached", &self.make_container.is_some())
            .field("initialized", &self.current.is_some())
            .finish()
    }
}
