use std::fmt;

/// A textual group value that is not a decimal `i32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupError {
    Empty,
    NotAnInteger { value: String },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::Empty => write!(f, "empty group value"),
            GroupError::NotAnInteger { value } => {
                write!(f, "group value {value:?} is not an integer")
            }
        }
    }
}

impl std::error::Error for GroupError {}

/// Parse a group number from text.
///
/// Surrounding whitespace is ignored; anything other than an optionally
/// signed decimal integer in `i32` range is rejected. Floats, booleans and
/// other loosely numeric values are not coerced.
pub fn parse_group(value: &str) -> Result<i32, GroupError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(GroupError::Empty);
    }
    v.parse::<i32>().map_err(|_| GroupError::NotAnInteger {
        value: v.to_string(),
    })
}
