//! Conditions: key/value requirements evaluated against a [`FactMapping`].
//!
//! A [`ConditionSet`] compiles to a [`Predicate<FactMapping>`]: one
//! [`SinglePredicate`] per condition (a [`FieldInput`] plus an
//! [`ExactMatcher`] or [`AnyOfMatcher`]) joined by `And` or `Or`.

use crate::{
    AnyOfMatcher, CaseSensitivity, ConfigError, ExactMatcher, FactMapping, FieldInput,
    InputMatcher, Predicate, PredicateTrace, SinglePredicate,
};
use std::fmt;
use std::str::FromStr;

/// The value(s) a condition accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Exactly this value must be present.
    One(String),
    /// Any one of these values must be present.
    AnyOf(Vec<String>),
}

/// One key/value requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    key: String,
    expected: Expected,
}

impl Condition {
    /// A condition satisfied when `value` appears under `key`.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected: Expected::One(value.into()),
        }
    }

    /// A condition satisfied when any of `values` appears under `key`.
    pub fn any_of<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            expected: Expected::AnyOf(values.into_iter().map(Into::into).collect()),
        }
    }

    /// The tag name this condition reads.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The accepted value(s).
    #[must_use]
    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// Compile to a predicate, normalizing key and values to `case`.
    #[must_use]
    pub fn compile(&self, case: CaseSensitivity) -> SinglePredicate<FactMapping> {
        let input = FieldInput::new(case.fold(&self.key));
        let matcher: Box<dyn InputMatcher> = match &self.expected {
            Expected::One(value) => Box::new(ExactMatcher::new(case.fold(value))),
            Expected::AnyOf(values) => {
                Box::new(AnyOfMatcher::new(values.iter().map(|v| case.fold(v))))
            }
        };
        SinglePredicate::new(Box::new(input), matcher)
    }
}

/// How the conditions of a set combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every condition must hold. An empty set matches.
    #[default]
    And,
    /// At least one condition must hold. An empty set never matches.
    Or,
}

/// Case-insensitive: `"and"`, `"AND"` and `"And"` all parse.
///
/// ```
/// use xmlsift::Mode;
///
/// assert_eq!("or".parse::<Mode>().unwrap(), Mode::Or);
/// assert_eq!(" And ".parse::<Mode>().unwrap(), Mode::And);
/// assert!("xor".parse::<Mode>().is_err());
/// ```
impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(ConfigError::InvalidMode(s.to_owned()))
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Mode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered conditions plus the [`Mode`] combining them.
///
/// Built once at startup and read-only afterwards.
///
/// # Example
///
/// ```
/// use xmlsift::{CaseSensitivity, Condition, ConditionSet, FactMapping, Mode};
///
/// let set = ConditionSet::new(
///     vec![Condition::new("Tax", "ABC"), Condition::any_of("Ref", ["1", "2"])],
///     Mode::And,
/// );
/// let facts = FactMapping::from_xml(
///     "<r><tax>abc</tax><ref>2</ref></r>",
///     CaseSensitivity::Insensitive,
/// ).unwrap();
/// assert!(set.evaluate(&facts));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
    mode: Mode,
}

impl ConditionSet {
    /// Create a condition set.
    #[must_use]
    pub fn new(conditions: Vec<Condition>, mode: Mode) -> Self {
        Self { conditions, mode }
    }

    /// The conditions, in configured order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The combination mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if there are no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Compile to a predicate over facts built with `case`.
    #[must_use]
    pub fn compile(&self, case: CaseSensitivity) -> Predicate<FactMapping> {
        let singles = self
            .conditions
            .iter()
            .map(|c| Predicate::Single(c.compile(case)))
            .collect();
        match self.mode {
            Mode::And => Predicate::And(singles),
            Mode::Or => Predicate::Or(singles),
        }
    }

    /// Decide match/no-match for `facts`.
    ///
    /// Pure: the result depends only on `facts` and `self`.
    #[must_use]
    pub fn evaluate(&self, facts: &FactMapping) -> bool {
        evaluate(facts, &self.conditions, self.mode)
    }

    /// Like [`evaluate`](Self::evaluate), returning the full trace.
    #[must_use]
    pub fn evaluate_with_trace(&self, facts: &FactMapping) -> PredicateTrace {
        self.compile(facts.case()).evaluate_with_trace(facts)
    }
}

/// Evaluate `conditions` combined by `mode` against `facts`.
///
/// Keys and values are normalized to the case convention `facts` was built
/// with. A condition whose key is absent from `facts` is unsatisfied.
#[must_use]
pub fn evaluate(facts: &FactMapping, conditions: &[Condition], mode: Mode) -> bool {
    let case = facts.case();
    let mut results = conditions.iter().map(|c| c.compile(case).evaluate(facts));
    match mode {
        Mode::And => results.all(|ok| ok),
        Mode::Or => results.any(|ok| ok),
    }
}
