//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the xmlsift condition engine.
//!
//! ```yaml
//! name: tax number
//! description: one exact condition
//! mode: AND
//! case_sensitive: true
//! conditions:
//!   - { key: TaxNumber, value: "123" }
//! cases:
//!   - name: present
//!     xml: <r><TaxNumber>123</TaxNumber></r>
//!     expect: true
//! ```

use serde::Deserialize;
use xmlsift::prelude::*;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    pub conditions: Vec<ConditionConfig>,
    pub cases: Vec<TestCase>,
}

fn default_case_sensitive() -> bool {
    true
}

/// One condition: `value` for an exact match, `values` for any-of.
#[derive(Debug, Deserialize)]
pub struct ConditionConfig {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

/// Test case: a document and the expected verdict.
/// `expect: error` marks a document that must fail to parse.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub xml: String,
    pub expect: Expectation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expectation {
    Verdict(bool),
    Error(ErrorMarker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMarker {
    Error,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert config to xmlsift types
// ═══════════════════════════════════════════════════════════════════════════════

impl ConditionConfig {
    /// # Panics
    ///
    /// Panics when neither `value` nor `values` is set.
    fn build(&self) -> Condition {
        match (&self.values, &self.value) {
            (Some(values), _) => Condition::any_of(&self.key, values.iter().map(String::as_str)),
            (None, Some(value)) => Condition::new(&self.key, value),
            (None, None) => panic!("condition '{}' has neither value nor values", self.key),
        }
    }
}

impl Fixture {
    /// Build the condition set described by this fixture
    pub fn build(&self) -> ConditionSet {
        ConditionSet::new(
            self.conditions.iter().map(ConditionConfig::build).collect(),
            self.mode,
        )
    }

    fn case(&self) -> CaseSensitivity {
        CaseSensitivity::from_flag(self.case_sensitive)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Expectation,
    pub actual: Expectation,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        let predicate = self.build().compile(self.case());
        self.cases
            .iter()
            .map(|case| {
                let actual = match FactMapping::from_xml(&case.xml, self.case()) {
                    Ok(facts) => Expectation::Verdict(predicate.evaluate(&facts)),
                    Err(_) => Expectation::Error(ErrorMarker::Error),
                };
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect,
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self.run();
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DOCS: &str = r#"
name: first
conditions:
  - { key: TaxNumber, value: "123" }
cases:
  - name: hit
    xml: <r><TaxNumber>123</TaxNumber></r>
    expect: true
---
name: second
mode: or
case_sensitive: false
conditions:
  - { key: Ref, values: [A, B] }
cases:
  - name: broken
    xml: <r><Ref>a</r>
    expect: error
"#;

    #[test]
    fn test_parse_multi() {
        let fixtures = Fixture::from_yaml_multi(TWO_DOCS).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].mode, Mode::And);
        assert!(fixtures[0].case_sensitive);
        assert_eq!(fixtures[1].mode, Mode::Or);
        assert!(!fixtures[1].case_sensitive);
        assert_eq!(
            fixtures[1].cases[0].expect,
            Expectation::Error(ErrorMarker::Error)
        );
    }

    #[test]
    fn test_run_reports_failures() {
        let yaml = r#"
name: wrong expectation
conditions:
  - { key: A, value: "1" }
cases:
  - name: claims match
    xml: <r><A>2</A></r>
    expect: true
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, Expectation::Verdict(false));
    }

    #[test]
    fn test_run_and_assert_passes() {
        for fixture in Fixture::from_yaml_multi(TWO_DOCS).unwrap() {
            fixture.run_and_assert();
        }
    }
}
