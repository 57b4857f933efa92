//! Run configuration.
//!
//! [`RawConfig`] is the serde-deserializable wire shape (camelCase keys, JSON
//! or YAML). [`SiftConfig::from_raw`] validates it into a [`SiftConfig`], and
//! [`SiftConfig::resolve`] anchors relative paths to a base directory,
//! producing the [`ResolvedConfig`] the [`Sifter`](crate::Sifter) runs on.
//!
//! ```yaml
//! inputDirs: [./usb, /mnt/archive]
//! outputDir: ./copynew
//! caseSensitive: false
//! stopAfterFirstMatch: false
//! mode: or
//! conditions:
//!   - { key: TaxNumber, value: "0105551234567" }
//!   - { key: ReferenceNumber, values: [DUIR000108766, DUIR000108767] }
//! ```

use crate::{CaseSensitivity, Condition, ConditionSet, ConfigError, Mode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Single input root.
    #[serde(default)]
    pub input_dir: Option<String>,

    /// Multiple input roots; preferred over `inputDir` when non-empty.
    #[serde(default)]
    pub input_dirs: Option<Vec<String>>,

    /// Destination directory (required).
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Compare keys and values verbatim (default `true`).
    #[serde(default)]
    pub case_sensitive: Option<bool>,

    /// Halt the whole run after the first copy (default `true`).
    #[serde(default)]
    pub stop_after_first_match: Option<bool>,

    /// `"AND"` or `"OR"`, any case (default AND).
    #[serde(default)]
    pub mode: Option<String>,

    /// Preferred condition form.
    #[serde(default)]
    pub conditions: Option<Vec<RawCondition>>,

    /// Legacy single condition, used when `conditions` is absent or empty.
    #[serde(default)]
    pub search: Option<RawSearch>,
}

/// One entry of `conditions`: `{key, value}` or `{key, values}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    /// Tag name.
    pub key: String,
    /// Single accepted value.
    #[serde(default, deserialize_with = "scalar::option")]
    pub value: Option<String>,
    /// Several accepted values; wins over `value` when both are given.
    #[serde(default, deserialize_with = "scalar::option_vec")]
    pub values: Option<Vec<String>>,
}

/// Legacy `search: {key, value}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearch {
    /// Tag name.
    #[serde(default)]
    pub key: Option<String>,
    /// Accepted value.
    #[serde(default, deserialize_with = "scalar::option")]
    pub value: Option<String>,
}

/// Condition values accept any scalar, so `value: 123` in YAML means "123".
mod scalar {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Uint(u64),
        Float(f64),
        Bool(bool),
    }

    impl From<Scalar> for String {
        fn from(s: Scalar) -> Self {
            match s {
                Scalar::Text(t) => t,
                Scalar::Int(i) => i.to_string(),
                Scalar::Uint(u) => u.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Bool(b) => b.to_string(),
            }
        }
    }

    pub(super) fn option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?.map(String::from))
    }

    pub(super) fn option_vec<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(Option::<Vec<Scalar>>::deserialize(d)?
            .map(|values| values.into_iter().map(String::from).collect()))
    }
}

/// Validated configuration, paths not yet anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiftConfig {
    /// Input roots in configured order.
    pub input_dirs: Vec<PathBuf>,
    /// Destination directory.
    pub output_dir: PathBuf,
    /// Case convention for facts and conditions.
    pub case: CaseSensitivity,
    /// Halt after the first successful copy.
    pub stop_after_first_match: bool,
    /// What makes a document match.
    pub conditions: ConditionSet,
}

impl SiftConfig {
    /// Read and validate a configuration file.
    ///
    /// The loader is chosen by extension: `.json` is parsed as JSON,
    /// anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?;
        Self::from_raw(raw)
    }

    /// Parse and validate YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "YAML",
            message: e.to_string(),
        })?;
        Self::from_raw(raw)
    }

    /// Validate the wire shape.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingKey`] for absent `outputDir`, or when neither
    ///   `inputDirs` (non-empty) nor `inputDir` is given
    /// - [`ConfigError::InvalidMode`] for a mode other than AND/OR
    /// - [`ConfigError::InvalidCondition`] for a condition with an empty key
    ///   or with neither `value` nor `values`
    /// - [`ConfigError::MissingConditions`] when no usable condition exists
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let input_dirs: Vec<PathBuf> = match (raw.input_dirs, raw.input_dir) {
            (Some(dirs), _) if !dirs.is_empty() => dirs.into_iter().map(PathBuf::from).collect(),
            (_, Some(dir)) => vec![PathBuf::from(dir)],
            _ => return Err(ConfigError::MissingKey { key: "inputDir" }),
        };

        let output_dir = raw
            .output_dir
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingKey { key: "outputDir" })?;

        let mode = raw.mode.as_deref().map_or(Ok(Mode::default()), str::parse::<Mode>)?;

        let conditions = match raw.conditions {
            Some(conditions) if !conditions.is_empty() => conditions
                .into_iter()
                .enumerate()
                .map(|(index, c)| c.into_condition(index))
                .collect::<Result<Vec<_>, _>>()?,
            _ => vec![raw
                .search
                .and_then(RawSearch::into_condition)
                .ok_or(ConfigError::MissingConditions)?],
        };

        Ok(Self {
            input_dirs,
            output_dir,
            case: CaseSensitivity::from_flag(raw.case_sensitive.unwrap_or(true)),
            stop_after_first_match: raw.stop_after_first_match.unwrap_or(true),
            conditions: ConditionSet::new(conditions, mode),
        })
    }

    /// Anchor relative input roots and the output directory to `base`.
    ///
    /// Absolute paths are kept as they are.
    #[must_use]
    pub fn resolve(self, base: &Path) -> ResolvedConfig {
        let anchor = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        ResolvedConfig {
            input_dirs: self.input_dirs.into_iter().map(anchor).collect(),
            output_dir: anchor(self.output_dir),
            case: self.case,
            stop_after_first_match: self.stop_after_first_match,
            conditions: self.conditions,
        }
    }
}

impl RawCondition {
    fn into_condition(self, index: usize) -> Result<Condition, ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::InvalidCondition {
                index,
                reason: "empty key",
            });
        }
        match (self.values, self.value) {
            (Some(values), _) => Ok(Condition::any_of(self.key, values)),
            (None, Some(value)) => Ok(Condition::new(self.key, value)),
            (None, None) => Err(ConfigError::InvalidCondition {
                index,
                reason: "needs `value` or `values`",
            }),
        }
    }
}

impl RawSearch {
    fn into_condition(self) -> Option<Condition> {
        let key = self.key.filter(|k| !k.is_empty())?;
        let value = self.value.filter(|v| !v.is_empty())?;
        Some(Condition::new(key, value))
    }
}

/// Configuration with every path anchored; the input to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Input roots in configured order.
    pub input_dirs: Vec<PathBuf>,
    /// Destination directory.
    pub output_dir: PathBuf,
    /// Case convention for facts and conditions.
    pub case: CaseSensitivity,
    /// Halt after the first successful copy.
    pub stop_after_first_match: bool,
    /// What makes a document match.
    pub conditions: ConditionSet,
}
