//! `InputMatcher`: Context-agnostic value matching
//!
//! The `InputMatcher` trait matches against [`MatchingData`]. It is
//! intentionally non-generic so one matcher type works for every context.
//!
//! # Available Matchers
//!
//! - [`ExactMatcher`]: One expected value must be present
//! - [`AnyOfMatcher`]: At least one of several expected values must be present

use crate::MatchingData;
use std::fmt::Debug;

/// Matches against [`MatchingData`].
///
/// # Example
///
/// ```
/// use xmlsift::{ExactMatcher, InputMatcher, MatchingData};
///
/// let matcher = ExactMatcher::new("hello");
/// assert!(matcher.matches(&MatchingData::Text("hello")));
/// assert!(!matcher.matches(&MatchingData::Text("world")));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `InputMatcher`",
    label = "this type cannot match against MatchingData",
    note = "use ExactMatcher or AnyOfMatcher, or implement `matches(&self, &MatchingData) -> bool`"
)]
pub trait InputMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    fn matches(&self, value: &MatchingData<'_>) -> bool;
}

#[diagnostic::do_not_recommend]
impl InputMatcher for Box<dyn InputMatcher> {
    fn matches(&self, value: &MatchingData<'_>) -> bool {
        (**self).matches(value)
    }
}

/// Exact value matcher.
///
/// Against `Text` this is string equality; against `Set` it is a
/// membership test. No trimming or case folding happens here: values are
/// normalized before the matcher is built.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use xmlsift::{ExactMatcher, InputMatcher, MatchingData};
///
/// let seen: BTreeSet<String> = ["123".to_string(), "456".to_string()].into();
/// let matcher = ExactMatcher::new("456");
/// assert!(matcher.matches(&MatchingData::Set(&seen)));
/// assert!(!ExactMatcher::new("45").matches(&MatchingData::Set(&seen)));
/// ```
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    expected: String,
}

impl ExactMatcher {
    /// Create a new exact matcher with the given expected value.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl InputMatcher for ExactMatcher {
    fn matches(&self, value: &MatchingData<'_>) -> bool {
        value.contains(&self.expected)
    }
}

/// Matches when any one of the expected values is present.
///
/// An empty list of expected values never matches.
///
/// # Example
///
/// ```
/// use xmlsift::{AnyOfMatcher, InputMatcher, MatchingData};
///
/// let matcher = AnyOfMatcher::new(["A", "B"]);
/// assert!(matcher.matches(&MatchingData::Text("B")));
/// assert!(!matcher.matches(&MatchingData::Text("C")));
/// ```
#[derive(Debug, Clone)]
pub struct AnyOfMatcher {
    expected: Vec<String>,
}

impl AnyOfMatcher {
    /// Create a matcher accepting any of `expected`.
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the accepted values.
    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }
}

impl InputMatcher for AnyOfMatcher {
    fn matches(&self, value: &MatchingData<'_>) -> bool {
        self.expected.iter().any(|e| value.contains(e))
    }
}
