use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Value
///
/// Literal operand of a column comparison.
/// Values of the same variant are totally ordered; `Int` and `Uint` compare
/// numerically with each other. Every other cross-variant pair is
/// incomparable.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    /// Stable one-byte tag used by fingerprint encodings.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Blob(_) => 0x01,
            Self::Bool(_) => 0x02,
            Self::Int(_) => 0x03,
            Self::List(_) => 0x04,
            Self::Null => 0x05,
            Self::Text(_) => 0x06,
            Self::Uint(_) => 0x07,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two values under strict semantics.
    ///
    /// Returns `None` when the pair is incomparable.
    #[must_use]
    pub fn strict_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Blob(a), Self::Blob(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Uint(a), Self::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::List(a), Self::List(b)) => compare_lists(a, b),
            _ => None,
        }
    }
}

// Lexicographic list ordering; any incomparable element pair poisons the result.
fn compare_lists(left: &[Value], right: &[Value]) -> Option<Ordering> {
    for (a, b) in left.iter().zip(right) {
        match a.strict_cmp(b)? {
            Ordering::Equal => {}
            other => return Some(other),
        }
    }

    Some(left.len().cmp(&right.len()))
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

///
/// TESTS
///
