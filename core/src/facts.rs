//! Field extraction: flattens an XML document into tag → values facts.
//!
//! A [`FactMapping`] answers one question: "does this document contain an
//! element named K whose text is V, anywhere in the tree?" Structure, depth
//! and attributes are deliberately discarded.

use crate::decode::decode;
use crate::{DataInput, DocumentError, MatchingData};
use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Whether keys and values are compared verbatim or lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Compare verbatim.
    #[default]
    Sensitive,
    /// Lower-case both sides before comparing.
    Insensitive,
}

impl CaseSensitivity {
    /// Build from a `caseSensitive` flag.
    #[must_use]
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }

    /// Returns `true` for [`CaseSensitivity::Sensitive`].
    #[must_use]
    pub fn is_sensitive(self) -> bool {
        self == Self::Sensitive
    }

    /// Normalize `s` to this convention.
    ///
    /// ```
    /// use xmlsift::CaseSensitivity;
    ///
    /// assert_eq!(CaseSensitivity::Insensitive.fold("TaxNumber"), "taxnumber");
    /// assert_eq!(CaseSensitivity::Sensitive.fold("TaxNumber"), "TaxNumber");
    /// ```
    #[must_use]
    pub fn fold(self, s: &str) -> Cow<'_, str> {
        match self {
            Self::Sensitive => Cow::Borrowed(s),
            Self::Insensitive => Cow::Owned(s.to_lowercase()),
        }
    }
}

/// Per-document mapping from local tag name to the distinct non-empty,
/// trimmed text values found under that tag.
///
/// Built fresh for each document and dropped after evaluation.
///
/// # Example
///
/// ```
/// use xmlsift::{CaseSensitivity, FactMapping};
///
/// let xml = r#"<inv:Invoice xmlns:inv="urn:invoice">
///     <inv:TaxNumber> 123 </inv:TaxNumber>
///     <Line><TaxNumber>456</TaxNumber></Line>
///     <Empty>   </Empty>
/// </inv:Invoice>"#;
///
/// let facts = FactMapping::from_xml(xml, CaseSensitivity::Sensitive).unwrap();
/// assert!(facts.contains("TaxNumber", "123"));
/// assert!(facts.contains("TaxNumber", "456"));
/// assert!(facts.values("Empty").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactMapping {
    case: CaseSensitivity,
    facts: BTreeMap<String, BTreeSet<String>>,
}

impl FactMapping {
    /// Create an empty mapping using the given case convention.
    #[must_use]
    pub fn new(case: CaseSensitivity) -> Self {
        Self {
            case,
            facts: BTreeMap::new(),
        }
    }

    /// Read and flatten the XML document at `path`.
    ///
    /// The file is read in one go and closed before parsing starts. Its
    /// encoding comes from a byte order mark or the XML declaration, and
    /// defaults to UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the file cannot be read, does not decode
    /// in its encoding, or is not well-formed XML.
    pub fn extract(path: &Path, case: CaseSensitivity) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode(&bytes).map_err(|encoding| DocumentError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;
        Self::parse(&text, case).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Flatten an in-memory XML document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] (with an empty path) if `xml` is not
    /// well-formed.
    pub fn from_xml(xml: &str, case: CaseSensitivity) -> Result<Self, DocumentError> {
        Self::parse(xml, case).map_err(|source| DocumentError::Parse {
            path: Default::default(),
            source,
        })
    }

    fn parse(xml: &str, case: CaseSensitivity) -> Result<Self, roxmltree::Error> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(xml, options)?;

        let mut facts = Self::new(case);
        for node in doc.descendants().filter(roxmltree::Node::is_element) {
            facts.insert(node.tag_name().name(), &leading_text(node));
        }
        Ok(facts)
    }

    /// Record `value` under `key`, trimming and case-folding both.
    ///
    /// Whitespace-only values are ignored.
    pub fn insert(&mut self, key: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let key = self.case.fold(key).into_owned();
        let value = self.case.fold(value).into_owned();
        self.facts.entry(key).or_default().insert(value);
    }

    /// The case convention this mapping was built with.
    #[must_use]
    pub fn case(&self) -> CaseSensitivity {
        self.case
    }

    /// Values recorded under an already-normalized `key`.
    #[must_use]
    pub fn values(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.facts.get(key)
    }

    /// Whether `value` was seen under `key`, normalizing both first.
    #[must_use]
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.facts
            .get(self.case.fold(key).as_ref())
            .is_some_and(|set| set.contains(self.case.fold(value).as_ref()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns `true` if no element carried text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate keys in sorted order with their values.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.facts.iter()
    }
}

impl<'a> IntoIterator for &'a FactMapping {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Text that precedes an element's first child element.
///
/// Text after a child element belongs to that child's tail, not to this
/// element. Comments and processing instructions are skipped, so text on
/// either side of them joins up.
fn leading_text<'a>(node: roxmltree::Node<'a, '_>) -> Cow<'a, str> {
    let mut texts = node
        .children()
        .take_while(|child| !child.is_element())
        .filter(roxmltree::Node::is_text)
        .filter_map(|child| child.text());
    match (texts.next(), texts.next()) {
        (None, _) => Cow::Borrowed(""),
        (Some(only), None) => Cow::Borrowed(only),
        (Some(first), Some(second)) => {
            let mut joined = format!("{first}{second}");
            texts.for_each(|t| joined.push_str(t));
            Cow::Owned(joined)
        }
    }
}

/// Looks up the value set recorded under one tag name.
///
/// The key is expected to be normalized to the mapping's case convention
/// already; [`ConditionSet::compile`](crate::ConditionSet::compile) takes care
/// of that.
#[derive(Debug, Clone)]
pub struct FieldInput {
    key: String,
}

impl FieldInput {
    /// Create an input reading `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The tag name being read.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl DataInput<FactMapping> for FieldInput {
    fn get<'a>(&self, ctx: &'a FactMapping) -> MatchingData<'a> {
        ctx.values(&self.key)
            .map_or(MatchingData::None, MatchingData::Set)
    }
}
