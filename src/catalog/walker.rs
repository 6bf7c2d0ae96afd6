//! Recursive discovery of catalog files under scan roots.
//!
//! The walk is synchronous and visits directory entries in file-name order,
//! so discovery order (and therefore reverse-lookup order) is stable between
//! runs. Problems are local: a missing root or an unreadable file is recorded
//! in the [`WalkReport`] and the walk moves on.

use crate::catalog::parser::{CatalogLine, parse_catalog};
use crate::catalog::scope::{resolve_scope, resolve_scope_within};
use crate::catalog::{CatalogEntry, ScopeContext};
use crate::error::{CatalogError, Result};
use std::collections::BTreeSet;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Default catalog file extension.
pub const DEFAULT_EXTENSION: &str = "ini";

/// Role of a filesystem entry during a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    EntryFile,
    DirectoryNode,
    Unrecognized,
}

/// Classify a visited path. Symlinks and special files are unrecognized.
pub fn classify_path(path: &Path, file_type: FileType, extension: &str) -> PathKind {
    if file_type.is_dir() {
        return PathKind::DirectoryNode;
    }
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension);
    if file_type.is_file() && has_extension {
        PathKind::EntryFile
    } else {
        PathKind::Unrecognized
    }
}

/// One parsed catalog file with the context resolved from its path.
#[derive(Clone, Debug)]
pub struct CatalogFile {
    pub path: PathBuf,
    pub context: ScopeContext,
    pub lines: Vec<CatalogLine>,
}

impl CatalogFile {
    /// Read and parse a catalog file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        Self::read_with(path, resolve_scope(path))
    }

    fn read_with(path: &Path, context: ScopeContext) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_context(path, &content, context))
    }

    pub fn from_content(path: &Path, content: &str) -> Self {
        Self::with_context(path, content, resolve_scope(path))
    }

    pub fn with_context(path: &Path, content: &str, context: ScopeContext) -> Self {
        Self {
            path: path.to_path_buf(),
            context,
            lines: parse_catalog(content).collect(),
        }
    }

    /// Index entries for this file, in line order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.lines
            .iter()
            .map(|line| CatalogEntry::new(&line.key, &line.value, &self.path, &self.context))
    }
}

/// Outcome of walking one or more roots.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Parsed files in discovery order.
    pub files: Vec<CatalogFile>,
    /// Roots that did not exist.
    pub missing_roots: Vec<PathBuf>,
    /// Per-file failures (unreadable files, unreadable directories).
    pub failures: Vec<CatalogError>,
}

impl WalkReport {
    pub fn entry_count(&self) -> usize {
        self.files.iter().map(|file| file.lines.len()).sum()
    }

    /// All entries of all files, in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.files.iter().flat_map(CatalogFile::entries)
    }

    /// Human-readable warnings for missing roots and failures.
    pub fn warnings(&self) -> Vec<String> {
        self.missing_roots
            .iter()
            .map(|root| {
                CatalogError::MissingRoot {
                    path: root.clone(),
                }
                .to_string()
            })
            .chain(self.failures.iter().map(ToString::to_string))
            .collect()
    }
}

/// Discovers and parses catalog files.
#[derive(Clone, Debug)]
pub struct TreeWalker {
    extension: String,
    workspace_root: Option<PathBuf>,
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl TreeWalker {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            workspace_root: None,
        }
    }

    /// Resolve scopes relative to `root` instead of from the whole path.
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn context_for(&self, path: &Path) -> ScopeContext {
        match &self.workspace_root {
            Some(root) => resolve_scope_within(path, root),
            None => resolve_scope(path),
        }
    }

    /// Read one catalog file with the same scope rules as a walk.
    pub fn read_file(&self, path: &Path) -> Result<CatalogFile> {
        CatalogFile::read_with(path, self.context_for(path))
    }

    /// Walk every root in order. A file reachable from several roots is
    /// parsed once, at its first discovery.
    pub fn walk<P: AsRef<Path>>(&self, roots: &[P]) -> WalkReport {
        let mut report = WalkReport::default();
        let mut seen = BTreeSet::new();
        for root in roots {
            self.walk_root(root.as_ref(), &mut seen, &mut report);
        }
        info!(
            files = report.files.len(),
            entries = report.entry_count(),
            missing_roots = report.missing_roots.len(),
            failures = report.failures.len(),
            "catalog walk finished"
        );
        report
    }

    fn walk_root(&self, root: &Path, seen: &mut BTreeSet<PathBuf>, report: &mut WalkReport) {
        if !root.exists() {
            warn!(root = %root.display(), "scan root not found, skipping");
            report.missing_roots.push(root.to_path_buf());
            return;
        }

        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    warn!(path = %path.display(), error = %err, "unable to visit path");
                    report.failures.push(CatalogError::Read {
                        path,
                        source: io::Error::from(err),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if classify_path(path, entry.file_type(), &self.extension) != PathKind::EntryFile {
                continue;
            }
            if !seen.insert(path.to_path_buf()) {
                continue;
            }

            match self.read_file(path) {
                Ok(file) => {
                    debug!(
                        path = %path.display(),
                        scope = %file.context.scope,
                        subset = file.context.subset.as_ref().map(|s| s.as_str()),
                        entries = file.lines.len(),
                        "loaded catalog"
                    );
                    report.files.push(file);
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable catalog");
                    report.failures.push(err);
                }
            }
        }
    }
}
