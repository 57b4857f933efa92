//! Evaluation trace types for explaining a verdict.
//!
//! [`PredicateTrace`] mirrors the [`Predicate`](crate::Predicate) structure
//! but captures results instead of inputs. Use `evaluate_with_trace()` to see
//! which conditions held for a document and which did not.

use std::fmt;

/// Trace of a predicate evaluation.
///
/// In And/Or, ALL children are evaluated (no short-circuit).
/// The `matched` result is still correct.
pub enum PredicateTrace {
    /// A single predicate evaluation.
    Single {
        /// Whether this predicate matched.
        matched: bool,
        /// Debug description of the `DataInput` (e.g. `FieldInput("TaxNumber")`).
        input: String,
        /// The `MatchingData` extracted from the context (Debug format).
        data: String,
        /// Debug description of the `InputMatcher`.
        matcher: String,
    },
    /// AND: all children must match.
    And {
        /// Whether all children matched.
        matched: bool,
        /// Trace of each child.
        children: Vec<PredicateTrace>,
    },
    /// OR: any child must match.
    Or {
        /// Whether any child matched.
        matched: bool,
        /// Trace of each child.
        children: Vec<PredicateTrace>,
    },
}

impl PredicateTrace {
    /// Get the overall match result of this predicate.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Single { matched, .. } | Self::And { matched, .. } | Self::Or { matched, .. } => {
                *matched
            }
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let mark = if self.matched() { "+" } else { "-" };
        match self {
            Self::Single {
                input,
                data,
                matcher,
                ..
            } => writeln!(f, "{indent}{mark} {input} {matcher} <- {data}"),
            Self::And { children, .. } | Self::Or { children, .. } => {
                let op = if matches!(self, Self::And { .. }) {
                    "AND"
                } else {
                    "OR"
                };
                writeln!(f, "{indent}{mark} {op}")?;
                for child in children {
                    child.render(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Indented tree, one line per node, `+` for matched and `-` for not.
impl fmt::Display for PredicateTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Debug for PredicateTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single {
                matched,
                input,
                data,
                matcher,
            } => f
                .debug_struct("Single")
                .field("matched", matched)
                .field("input", input)
                .field("data", data)
                .field("matcher", matcher)
                .finish(),
            Self::And { matched, children } => f
                .debug_struct("And")
                .field("matched", matched)
                .field("children", children)
                .finish(),
            Self::Or { matched, children } => f
                .debug_struct("Or")
                .field("matched", matched)
                .field("children", children)
                .finish(),
        }
    }
}
