//! Error taxonomy.
//!
//! | Error | Scope | Effect on the run |
//! |-------|-------|-------------------|
//! | [`ConfigError`] | whole configuration | fatal, before any traversal |
//! | [`InputRootError`] | one input root | warning, root skipped |
//! | [`DocumentError`] | one candidate file | diagnostic, file treated as non-matching |
//! | [`SiftError`] | the run | fatal (config, output directory, copy failure) |

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or incomplete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read \"{}\": {source}", .path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON/YAML, or has wrongly typed keys.
    #[error("{format} parse error: {message}")]
    Parse {
        /// `"JSON"` or `"YAML"`.
        format: &'static str,
        /// Parser message (includes line/column when available).
        message: String,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    MissingKey {
        /// The wire name of the key.
        key: &'static str,
    },

    /// Neither `conditions` nor a usable legacy `search` is present.
    #[error("config must contain a non-empty `conditions` list or `search` with both `key` and `value`")]
    MissingConditions,

    /// A condition entry is unusable.
    #[error("condition #{index}: {reason}")]
    InvalidCondition {
        /// Zero-based position in `conditions`.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// `mode` is neither AND nor OR.
    #[error("invalid mode \"{0}\", expected \"AND\" or \"OR\"")]
    InvalidMode(String),
}

/// A configured input root that cannot be traversed.
#[derive(Debug, Error)]
pub enum InputRootError {
    /// Nothing exists at the path.
    #[error("input root \"{}\" does not exist", .0.display())]
    Missing(PathBuf),

    /// The path exists but is not a directory.
    #[error("input root \"{}\" is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The path could not be inspected (permissions, a non-directory parent, ...).
    #[error("cannot access input root \"{}\": {source}", .path.display())]
    Inaccessible {
        /// The configured root.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl InputRootError {
    /// The configured root that was skipped.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Missing(path) | Self::NotADirectory(path) | Self::Inaccessible { path, .. } => {
                path
            }
        }
    }
}

/// A candidate document that could not be opened or parsed.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read \"{}\": {source}", .path.display())]
    Open {
        /// The document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file's bytes do not decode in its detected encoding.
    #[error("\"{}\" is not valid {encoding}", .path.display())]
    Encoding {
        /// The document path.
        path: PathBuf,
        /// Name of the encoding that was tried.
        encoding: &'static str,
    },

    /// The file is not well-formed XML.
    #[error("\"{}\" is not well-formed XML: {source}", .path.display())]
    Parse {
        /// The document path (empty when parsing an in-memory string).
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: roxmltree::Error,
    },
}

impl DocumentError {
    /// The path of the document that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Encoding { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}

/// Errors that terminate a run.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The output directory could not be created.
    #[error("cannot create output directory \"{}\": {source}", .path.display())]
    OutputDir {
        /// The output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A matched file could not be copied.
    #[error("failed to copy \"{}\" to \"{}\": {source}", .from.display(), .to.display())]
    Copy {
        /// Source document.
        from: PathBuf,
        /// Destination that was being written.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
