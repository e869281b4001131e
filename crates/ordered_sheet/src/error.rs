use std::fmt;

/// Pre-existing container content that does not follow the marker layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HydrateError {
    /// A real rule came before any marker.
    RuleBeforeMarker { index: usize },
    /// A marker selector whose group number does not decode.
    InvalidMarker { index: usize, text: String },
    /// A second marker for a group that is already open.
    DuplicateMarker { index: usize, group: i32 },
    /// A marker for a lower group after a higher one.
    MarkerOutOfOrder { index: usize, group: i32, previous: i32 },
}

impl fmt::Display for HydrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HydrateError::RuleBeforeMarker { index } => {
                write!(f, "rule {index} precedes the first group marker")
            }
            HydrateError::InvalidMarker { index, text } => {
                write!(f, "rule {index} is not a valid group marker: {text:?}")
            }
            HydrateError::DuplicateMarker { index, group } => {
                write!(f, "rule {index} repeats the marker of group {group}")
            }
            HydrateError::MarkerOutOfOrder {
                index,
                group,
                previous,
            } => write!(
                f,
                "rule {index} opens group {group} after group {previous}"
            ),
        }
    }
}

impl std::error::Error for HydrateError {}
