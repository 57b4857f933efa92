//! Predicate: Boolean expressions over `DataInputs`
//!
//! Predicates combine [`DataInput`] and [`InputMatcher`] into boolean
//! conditions that compose with AND/OR.

use crate::{DataInput, InputMatcher, MatchingData, PredicateTrace};
use std::fmt::Debug;

/// A single predicate: combines a [`DataInput`] with an [`InputMatcher`].
///
/// # INV: None → false
///
/// If the `DataInput` returns [`MatchingData::None`], the predicate evaluates
/// to `false` without consulting the matcher. A condition on a tag the
/// document never mentions is therefore unsatisfied.
pub struct SinglePredicate<Ctx> {
    input: Box<dyn DataInput<Ctx>>,
    matcher: Box<dyn InputMatcher>,
}

impl<Ctx> SinglePredicate<Ctx> {
    /// Create a new single predicate from a `DataInput` and `InputMatcher`.
    #[must_use]
    pub fn new(input: Box<dyn DataInput<Ctx>>, matcher: Box<dyn InputMatcher>) -> Self {
        Self { input, matcher }
    }

    /// Get a reference to the input.
    #[must_use]
    pub fn input(&self) -> &dyn DataInput<Ctx> {
        &*self.input
    }

    /// Get a reference to the matcher.
    #[must_use]
    pub fn matcher(&self) -> &dyn InputMatcher {
        &*self.matcher
    }

    /// Evaluate this predicate against the given context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        match self.input.get(ctx) {
            MatchingData::None => false,
            data => self.matcher.matches(&data),
        }
    }

    /// Evaluate with full trace for debugging.
    #[must_use]
    pub fn evaluate_with_trace(&self, ctx: &Ctx) -> PredicateTrace {
        let data = self.input.get(ctx);
        let matched = match data {
            MatchingData::None => false,
            _ => self.matcher.matches(&data),
        };
        PredicateTrace::Single {
            matched,
            input: format!("{:?}", self.input),
            data: format!("{data:?}"),
            matcher: format!("{:?}", self.matcher),
        }
    }
}

impl<Ctx> Debug for SinglePredicate<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinglePredicate")
            .field("input", &self.input)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Composite predicate with boolean logic.
///
/// Evaluation short-circuits:
///
/// - `And`: every child must match; an empty `And` is vacuously `true`
/// - `Or`: at least one child must match; an empty `Or` is `false`
pub enum Predicate<Ctx> {
    /// A single predicate.
    Single(SinglePredicate<Ctx>),

    /// All predicates must match (logical AND).
    And(Vec<Predicate<Ctx>>),

    /// Any predicate must match (logical OR).
    Or(Vec<Predicate<Ctx>>),
}

impl<Ctx> Predicate<Ctx> {
    /// Evaluate this predicate against the given context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        match self {
            Predicate::Single(p) => p.evaluate(ctx),
            Predicate::And(predicates) => predicates.iter().all(|p| p.evaluate(ctx)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.evaluate(ctx)),
        }
    }

    /// Evaluate with full trace for debugging.
    ///
    /// Unlike [`evaluate()`](Self::evaluate), this does NOT short-circuit
    /// And/Or: all children are evaluated. The `matched` result is the same.
    #[must_use]
    pub fn evaluate_with_trace(&self, ctx: &Ctx) -> PredicateTrace {
        match self {
            Self::Single(p) => p.evaluate_with_trace(ctx),
            Self::And(predicates) => {
                let children: Vec<PredicateTrace> = predicates
                    .iter()
                    .map(|p| p.evaluate_with_trace(ctx))
                    .collect();
                let matched = children.iter().all(PredicateTrace::matched);
                PredicateTrace::And { matched, children }
            }
            Self::Or(predicates) => {
                let children: Vec<PredicateTrace> = predicates
                    .iter()
                    .map(|p| p.evaluate_with_trace(ctx))
                    .collect();
                let matched = children.iter().any(PredicateTrace::matched);
                PredicateTrace::Or { matched, children }
            }
        }
    }

    /// Number of single predicates in this tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::Single(_) => 1,
            Predicate::And(ps) | Predicate::Or(ps) => ps.iter().map(Predicate::leaf_count).sum(),
        }
    }
}

impl<Ctx> Debug for Predicate<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Single(p) => f.debug_tuple("Single").field(p).finish(),
            Predicate::And(ps) => f.debug_tuple("And").field(&ps.len()).finish(),
            Predicate::Or(ps) => f.debug_tuple("Or").field(&ps.len()).finish(),
        }
    }
}
