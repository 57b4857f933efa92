//! Traversal & copy: walks the input roots and copies matching documents.
//!
//! Strictly sequential: roots in configured order, and within a root each
//! directory's files (by name) before its subdirectories (by name). That
//! order is what makes "stop after first match" deterministic.

use crate::{DocumentMatcher, InputRootError, ResolvedConfig, SiftError, Verdict};
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// One copied document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    /// Where the document was found.
    pub source: PathBuf,
    /// Where it was copied to.
    pub destination: PathBuf,
}

/// What a run did.
#[derive(Debug)]
pub struct RunSummary {
    /// The output directory.
    pub output_dir: PathBuf,
    /// Number of documents copied.
    pub matched: usize,
    /// Number of candidate documents examined.
    pub scanned: usize,
    /// Number of candidates that could not be read or parsed.
    pub failed: usize,
    /// Every copy, in the order it happened.
    pub copies: Vec<CopyRecord>,
    /// Input roots that were skipped.
    pub skipped_roots: Vec<InputRootError>,
    /// Whether the run halted at the first match.
    pub stopped_early: bool,
}

impl RunSummary {
    fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            matched: 0,
            scanned: 0,
            failed: 0,
            copies: Vec::new(),
            skipped_roots: Vec::new(),
            stopped_early: false,
        }
    }
}

/// Runs one sift over a [`ResolvedConfig`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use xmlsift::{SiftConfig, Sifter};
///
/// let config = SiftConfig::load(Path::new("xmlsift.yaml"))?.resolve(Path::new("/opt/xmlsift"));
/// let summary = Sifter::new(&config).run()?;
/// println!("{} matched", summary.matched);
/// # Ok::<(), xmlsift::SiftError>(())
/// ```
#[derive(Debug)]
pub struct Sifter<'a> {
    config: &'a ResolvedConfig,
    matcher: DocumentMatcher,
}

impl<'a> Sifter<'a> {
    /// Compile the configured conditions for a run.
    #[must_use]
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self {
            config,
            matcher: DocumentMatcher::new(&config.conditions, config.case),
        }
    }

    /// Walk every input root and copy matching documents.
    ///
    /// Missing roots and unreadable documents are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`SiftError::OutputDir`] if the output directory cannot be created
    /// - [`SiftError::Copy`] if a matched document cannot be copied
    pub fn run(&self) -> Result<RunSummary, SiftError> {
        let output_dir = &self.config.output_dir;
        let output_error = |source| SiftError::OutputDir {
            path: output_dir.clone(),
            source,
        };
        fs::create_dir_all(output_dir).map_err(output_error)?;
        // Walked paths are canonical, so compare against the canonical form.
        let excluded = fs::canonicalize(output_dir).map_err(output_error)?;

        let mut summary = RunSummary::new(output_dir.clone());
        for root in &self.config.input_dirs {
            let root = match open_root(root) {
                Ok(root) => root,
                Err(e) => {
                    warn!(error = %e, "skipping input root");
                    summary.skipped_roots.push(e);
                    continue;
                }
            };
            if self.sift_root(&root, &excluded, &mut summary)?.is_break() {
                summary.stopped_early = true;
                break;
            }
        }

        if !summary.stopped_early {
            info!(
                matched = summary.matched,
                scanned = summary.scanned,
                failed = summary.failed,
                output = %output_dir.display(),
                "sift complete"
            );
        }
        Ok(summary)
    }

    fn sift_root(
        &self,
        root: &Path,
        excluded: &Path,
        summary: &mut RunSummary,
    ) -> Result<ControlFlow<()>, SiftError> {
        debug!(root = %root.display(), "walking input root");
        if root == excluded {
            warn!(
                root = %root.display(),
                "input root is the output directory; copies made in this run are not rescanned"
            );
        }
        // Each directory is listed in full before its entries are visited,
        // so copies landing in an already-listed directory are never seen.
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_before_dirs)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.path() != excluded);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !is_candidate(&entry) {
                continue;
            }

            summary.scanned += 1;
            match self.matcher.verdict(entry.path()) {
                Verdict::Match => {}
                Verdict::NoMatch => continue,
                Verdict::Failed => {
                    summary.failed += 1;
                    continue;
                }
            }

            let destination = unique_destination(&self.config.output_dir, entry.file_name());
            copy_with_metadata(entry.path(), &destination).map_err(|source| SiftError::Copy {
                from: entry.path().to_path_buf(),
                to: destination.clone(),
                source,
            })?;
            info!(
                source = %entry.path().display(),
                destination = %destination.display(),
                "MATCH"
            );
            summary.matched += 1;
            summary.copies.push(CopyRecord {
                source: entry.into_path(),
                destination,
            });

            if self.config.stop_after_first_match {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Check a configured root and return its canonical form.
fn open_root(root: &Path) -> Result<PathBuf, InputRootError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {
            Ok(fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()))
        }
        Ok(_) => Err(InputRootError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(InputRootError::Missing(root.to_path_buf()))
        }
        Err(source) => Err(InputRootError::Inaccessible {
            path: root.to_path_buf(),
            source,
        }),
    }
}

fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// A regular file (or a symlink to one) whose name ends in `.xml`, any case.
fn is_candidate(entry: &DirEntry) -> bool {
    let name = entry.file_name().as_encoded_bytes();
    let is_xml = name.len() >= 4 && name[name.len() - 4..].eq_ignore_ascii_case(b".xml");
    is_xml && (entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()))
}

/// First free name for `file_name` in `dir`: `name.ext`, then `name_2.ext`,
/// `name_3.ext`, and so on.
///
/// ```
/// use std::ffi::OsStr;
/// use xmlsift::unique_destination;
///
/// let dir = tempfile::tempdir().unwrap();
/// assert_eq!(unique_destination(dir.path(), OsStr::new("a.xml")), dir.path().join("a.xml"));
/// std::fs::write(dir.path().join("a.xml"), "").unwrap();
/// assert_eq!(unique_destination(dir.path(), OsStr::new("a.xml")), dir.path().join("a_2.xml"));
/// ```
#[must_use]
pub fn unique_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let first = dir.join(file_name);
    if !is_taken(&first) {
        return first;
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);
    let extension = name.extension();
    let mut n: u64 = 2;
    loop {
        let mut candidate = OsString::from(stem);
        candidate.push(format!("_{n}"));
        if let Some(ext) = extension {
            candidate.push(".");
            candidate.push(ext);
        }
        let candidate = dir.join(candidate);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// A dangling symlink still occupies the name.
fn is_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Copy contents and permissions, then access and modification times.
///
/// # Errors
///
/// Returns the underlying I/O error from the copy or the timestamp update.
pub fn copy_with_metadata(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;
    let meta = fs::metadata(from)?;
    filetime::set_file_times(
        to,
        filetime::FileTime::from_last_access_time(&meta),
        filetime::FileTime::from_last_modification_time(&meta),
    )
}
