//! `MatchingData`: Borrowed data that flows between `DataInput` and `InputMatcher`
//!
//! `DataInputs` produce `MatchingData` borrowed from their context, and
//! `InputMatchers` consume it. Nothing is cloned on the evaluation path:
//! a fact lookup hands out a reference into the [`FactMapping`](crate::FactMapping).

use std::collections::BTreeSet;

/// The erased data type that flows between `DataInput` and `InputMatcher`.
///
/// # Variants
///
/// - `None`: No data available (the key is absent from the context)
/// - `Text`: A single string value
/// - `Set`: Every distinct value recorded under a key
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use xmlsift::MatchingData;
///
/// let values: BTreeSet<String> = ["123".to_string()].into();
/// let data = MatchingData::Set(&values);
/// assert!(data.contains("123"));
/// assert!(!MatchingData::None.contains("123"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingData<'a> {
    /// No data available.
    /// When a predicate receives this, it evaluates to `false`.
    None,

    /// A single string value.
    Text(&'a str),

    /// A set of distinct string values.
    Set(&'a BTreeSet<String>),
}

impl<'a> MatchingData<'a> {
    /// Returns `true` if this is the `None` variant.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the text if this is the `Text` variant.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the set if this is the `Set` variant.
    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&'a BTreeSet<String>> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Membership test: equality for `Text`, set membership for `Set`.
    ///
    /// `None` never contains anything.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::None => false,
            Self::Text(s) => *s == value,
            Self::Set(set) => set.contains(value),
        }
    }

    /// Returns a static string describing the data type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Text(_) => "text",
            Self::Set(_) => "set",
        }
    }
}

impl<'a> From<&'a str> for MatchingData<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a BTreeSet<String>> for MatchingData<'a> {
    fn from(set: &'a BTreeSet<String>) -> Self {
        Self::Set(set)
    }
}
