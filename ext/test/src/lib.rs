//! xmlsift-test: fixtures and scratch trees for conformance testing
//!
//! Provides a YAML fixture runner for the condition engine and a
//! [`TempTree`] builder for exercising the driver on real directories.
//!
//! # Example
//!
//! ```
//! use xmlsift_test::prelude::*;
//!
//! let tree = TempTree::new()
//!     .with_file("usb/a.xml", "<r><TaxNumber>123</TaxNumber></r>")
//!     .with_file("usb/b.xml", "<r><TaxNumber>999</TaxNumber></r>");
//!
//! let config = tree.config(
//!     &["usb"],
//!     "out",
//!     ConditionSet::new(vec![Condition::new("TaxNumber", "123")], Mode::And),
//! );
//!
//! let summary = Sifter::new(&config).run().unwrap();
//! assert_eq!(summary.matched, 1);
//! assert_eq!(tree.file_names("out"), ["a.xml"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xmlsift::prelude::*;

pub mod fixture;

/// A scratch directory tree, removed when dropped.
///
/// Helpers panic on I/O failure; this is test tooling.
#[derive(Debug)]
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Add a file (builder pattern). Parent directories are created.
    #[must_use]
    pub fn with_file(self, relative: &str, contents: impl AsRef<[u8]>) -> Self {
        self.write(relative, contents);
        self
    }

    /// Add an empty directory (builder pattern).
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path().join(relative)).expect("create dir");
        self
    }

    /// Root of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Write a file, creating parent directories, and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    /// Read a file inside the tree as text.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative)).expect("read file")
    }

    /// Sorted names of the regular files directly inside `relative`.
    /// A missing directory yields no names.
    #[must_use]
    pub fn file_names(&self, relative: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.join(relative)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// A case-sensitive, run-to-completion config with roots and output
    /// relative to this tree.
    #[must_use]
    pub fn config(&self, inputs: &[&str], output: &str, conditions: ConditionSet) -> ResolvedConfig {
        ResolvedConfig {
            input_dirs: inputs.iter().map(|input| self.join(input)).collect(),
            output_dir: self.join(output),
            case: CaseSensitivity::Sensitive,
            stop_after_first_match: false,
            conditions,
        }
    }
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::fixture::Fixture;
    pub use super::TempTree;
    pub use xmlsift::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_builder() {
        let tree = TempTree::new()
            .with_file("a/b/c.xml", "<r/>")
            .with_dir("empty");

        assert!(tree.join("a/b/c.xml").is_file());
        assert!(tree.join("empty").is_dir());
        assert_eq!(tree.read("a/b/c.xml"), "<r/>");
    }

    #[test]
    fn test_file_names_sorted_and_files_only() {
        let tree = TempTree::new()
            .with_file("d/z.xml", "")
            .with_file("d/a.xml", "")
            .with_file("d/sub/inner.xml", "");

        assert_eq!(tree.file_names("d"), ["a.xml", "z.xml"]);
        assert!(tree.file_names("missing").is_empty());
    }

    #[test]
    fn test_config_paths_are_inside_tree() {
        let tree = TempTree::new();
        let config = tree.config(&["A", "B"], "out", ConditionSet::default());

        assert_eq!(config.input_dirs, [tree.join("A"), tree.join("B")]);
        assert_eq!(config.output_dir, tree.join("out"));
        assert!(!config.stop_after_first_match);
    }
}
