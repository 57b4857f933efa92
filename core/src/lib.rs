//! xmlsift - copy the XML documents of a directory tree that match
//! tag/value conditions.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - [`FactMapping`]: a document flattened to *local tag name → distinct text values*
//! - [`MatchingData`]: borrowed data handed from a [`DataInput`] to an [`InputMatcher`]
//! - [`FieldInput`]: `DataInput<FactMapping>` reading one tag's values
//! - [`ExactMatcher`] / [`AnyOfMatcher`]: non-generic value matchers
//! - [`SinglePredicate`] / [`Predicate`]: condition leaves and their AND/OR composition
//! - [`ConditionSet`]: configured conditions, compiled to a `Predicate<FactMapping>`
//! - [`DocumentMatcher`]: path in, verdict out; document errors never escape
//! - [`Sifter`]: walks input roots and copies matches under collision-free names
//!
//! # Key invariants
//!
//! 1. **Missing key → false**: a [`FieldInput`] for a tag the document never
//!    mentions yields [`MatchingData::None`], and the predicate is `false`.
//!
//! 2. **Only text matters**: attributes, depth and namespace prefixes are
//!    ignored; whitespace-only text never becomes a fact.
//!
//! 3. **One bad file never aborts a batch**: parse and read failures are
//!    logged and counted, and the walk continues.
//!
//! # Example
//!
//! ```
//! use xmlsift::prelude::*;
//!
//! let conditions = ConditionSet::new(
//!     vec![Condition::new("TaxNumber", "123")],
//!     Mode::And,
//! );
//!
//! let facts = FactMapping::from_xml(
//!     r#"<inv:Invoice xmlns:inv="urn:x"><inv:Seller><inv:TaxNumber>123</inv:TaxNumber></inv:Seller></inv:Invoice>"#,
//!     CaseSensitivity::Sensitive,
//! ).unwrap();
//!
//! assert!(conditions.evaluate(&facts));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod condition;
mod config;
mod data_input;
mod decode;
mod driver;
mod error;
mod facts;
mod input_matcher;
mod matcher;
mod matching_data;
mod predicate;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Matching engine
pub use data_input::DataInput;
pub use input_matcher::{AnyOfMatcher, ExactMatcher, InputMatcher};
pub use matching_data::MatchingData;
pub use predicate::{Predicate, SinglePredicate};
pub use trace::PredicateTrace;

// Documents and conditions
pub use condition::{evaluate, Condition, ConditionSet, Expected, Mode};
pub use facts::{CaseSensitivity, FactMapping, FieldInput};
pub use matcher::{matches, DocumentMatcher, Verdict};

// Runs
pub use config::{RawCondition, RawConfig, RawSearch, ResolvedConfig, SiftConfig};
pub use driver::{copy_with_metadata, unique_destination, CopyRecord, RunSummary, Sifter};

// Errors
pub use error::{ConfigError, DocumentError, InputRootError, SiftError};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use xmlsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Engine
        AnyOfMatcher,
        CaseSensitivity,
        Condition,
        ConditionSet,
        DataInput,
        DocumentMatcher,
        ExactMatcher,
        FactMapping,
        FieldInput,
        InputMatcher,
        MatchingData,
        Mode,
        Predicate,
        PredicateTrace,
        // Runs
        ResolvedConfig,
        RunSummary,
        SiftConfig,
        SiftError,
        Sifter,
        SinglePredicate,
        Verdict,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuration file looked up next to the executable when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "xmlsift.yaml";
