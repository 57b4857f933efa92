//! Document matcher: extraction plus evaluation for one file.
//!
//! [`DocumentMatcher::matches`] never fails: an unreadable or malformed file
//! is reported and treated as non-matching, so one bad document cannot abort
//! a batch.

use crate::{CaseSensitivity, ConditionSet, DocumentError, FactMapping, Predicate, PredicateTrace};
use std::path::Path;
use tracing::{debug, error};

/// Outcome of matching one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The conditions hold.
    Match,
    /// The document was read but the conditions do not hold.
    NoMatch,
    /// The document could not be read or parsed.
    Failed,
}

/// A [`ConditionSet`] compiled once for a run, applied to file paths.
pub struct DocumentMatcher {
    predicate: Predicate<FactMapping>,
    case: CaseSensitivity,
}

impl DocumentMatcher {
    /// Compile `conditions` for documents read with `case`.
    #[must_use]
    pub fn new(conditions: &ConditionSet, case: CaseSensitivity) -> Self {
        Self {
            predicate: conditions.compile(case),
            case,
        }
    }

    /// The case convention facts are extracted with.
    #[must_use]
    pub fn case(&self) -> CaseSensitivity {
        self.case
    }

    /// Extract and evaluate, surfacing document errors.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the file cannot be read or parsed.
    pub fn check(&self, path: &Path) -> Result<bool, DocumentError> {
        let facts = FactMapping::extract(path, self.case)?;
        Ok(self.predicate.evaluate(&facts))
    }

    /// Extract and evaluate; a document error is logged, never returned.
    pub fn verdict(&self, path: &Path) -> Verdict {
        match self.check(path) {
            Ok(matched) => {
                debug!(file = %path.display(), matched, "evaluated");
                if matched {
                    Verdict::Match
                } else {
                    Verdict::NoMatch
                }
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "skipping unreadable document");
                Verdict::Failed
            }
        }
    }

    /// Extract and evaluate; a document error is logged and yields `false`.
    pub fn matches(&self, path: &Path) -> bool {
        self.verdict(path) == Verdict::Match
    }

    /// Extract and evaluate with a full trace.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the file cannot be read or parsed.
    pub fn explain(&self, path: &Path) -> Result<PredicateTrace, DocumentError> {
        let facts = FactMapping::extract(path, self.case)?;
        Ok(self.predicate.evaluate_with_trace(&facts))
    }
}

impl std::fmt::Debug for DocumentMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentMatcher")
            .field("predicate", &self.predicate)
            .field("case", &self.case)
            .finish()
    }
}

/// One-shot form of [`DocumentMatcher::matches`].
pub fn matches(path: &Path, conditions: &ConditionSet, case: CaseSensitivity) -> bool {
    DocumentMatcher::new(conditions, case).matches(path)
}
