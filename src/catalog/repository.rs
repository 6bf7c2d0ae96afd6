//! Process-wide handle over one [`CatalogIndex`].
//!
//! Queries take a shared lock; loads, removals, appends and reloads take the
//! write lock. Reloads walk and parse before locking and then swap the
//! affected sources under a single write guard, so readers observe either the
//! previous or the refreshed state of a root.

use crate::catalog::walker::{TreeWalker, WalkReport};
use crate::catalog::{CatalogEntry, CatalogIndex, Scope, SubsetId};
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
pub struct CatalogRepository {
    index: Arc<RwLock<CatalogIndex>>,
    walker: TreeWalker,
}

impl CatalogRepository {
    pub fn new(walker: TreeWalker) -> Self {
        Self {
            index: Arc::default(),
            walker,
        }
    }

    /// Build a repository by walking `roots` in order.
    pub fn build<P: AsRef<Path>>(walker: TreeWalker, roots: &[P]) -> (Self, WalkReport) {
        let repo = Self::new(walker);
        let report = repo.load_roots(roots);
        (repo, report)
    }

    pub fn walker(&self) -> &TreeWalker {
        &self.walker
    }

    /// Shared read access. A poisoned lock is recovered: index mutations
    /// never unwind halfway through.
    pub fn read(&self) -> RwLockReadGuard<'_, CatalogIndex> {
        self.index.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogIndex> {
        self.index.write().unwrap_or_else(|err| err.into_inner())
    }

    /// Walk `roots` and add everything found, without removing anything.
    pub fn load_roots<P: AsRef<Path>>(&self, roots: &[P]) -> WalkReport {
        let report = self.walker.walk(roots);
        let loaded = self.write().load(report.entries());
        debug!(loaded, "catalog roots loaded");
        report
    }

    /// Insert a batch of entries.
    pub fn load<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        self.write().load(entries)
    }

    /// Re-walk `root`, replacing every entry previously sourced from files
    /// under it. Files deleted since the last walk drop out of the index.
    /// Files already known keep their load rank, so overrides loaded from
    /// later roots still win; files new to the index rank after everything.
    pub fn reload_root(&self, root: &Path) -> WalkReport {
        let report = self.walker.walk(&[root]);
        let mut index = self.write();
        let stale = index.sources_under(root);
        let removed: usize = stale.iter().map(|path| index.remove_by_source(path)).sum();
        let loaded = index.load(report.entries());
        info!(root = %root.display(), removed, loaded, "catalog root reloaded");
        report
    }

    /// Re-read a single catalog file, or drop its entries if it is gone.
    /// Returns the number of entries now attributed to it.
    pub fn reload_file(&self, path: &Path) -> Result<usize> {
        if !path.exists() {
            let removed = self.remove_by_source(path);
            debug!(path = %path.display(), removed, "catalog file removed");
            return Ok(0);
        }
        let file = self.walker.read_file(path)?;
        let mut index = self.write();
        index.remove_by_source(path);
        Ok(index.load(file.entries()))
    }

    pub fn remove_by_source(&self, path: &Path) -> usize {
        self.write().remove_by_source(path)
    }

    pub fn append(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        scope: Scope,
        source_path: impl Into<PathBuf>,
        subset: Option<SubsetId>,
    ) {
        self.write().append(key, value, scope, source_path, subset);
    }

    pub fn lookup_by_key(&self, key: &str, scope: Scope) -> Option<String> {
        self.read().lookup_by_key(key, scope).map(str::to_string)
    }

    /// Owned copies of the matching entries, so no lock outlives the call.
    pub fn lookup_by_value(
        &self,
        value: &str,
        scope: Scope,
        subset: Option<&SubsetId>,
    ) -> Vec<CatalogEntry> {
        self.read()
            .lookup_by_value(value, scope, subset)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Drop every entry.
    pub fn reset(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("language/en-GB");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en-GB.ini"), "AXS_PAY = \"Pay\"\nAXS_BACK = \"Back\"\n").unwrap();
        temp
    }

    #[test]
    fn reload_root_never_duplicates_entries() {
        let temp = fixture();
        let root = temp.path().join("language");
        let (repo, _) = CatalogRepository::build(TreeWalker::default(), &[&root]);
        assert_eq!(repo.read().len(), 2);

        repo.reload_root(&root);
        repo.reload_root(&root);
        assert_eq!(repo.read().len(), 2);
        assert_eq!(repo.lookup_by_value("Pay", Scope::Site, None).len(), 1);
    }

    #[test]
    fn reload_root_drops_deleted_files() {
        let temp = fixture();
        let root = temp.path().join("language");
        let (repo, _) = CatalogRepository::build(TreeWalker::default(), &[&root]);
        fs::remove_file(root.join("en-GB/en-GB.ini")).unwrap();

        repo.reload_root(&root);
        assert!(repo.read().is_empty());
    }

    #[test]
    fn reload_file_picks_up_edits() {
        let temp = fixture();
        let file = temp.path().join("language/en-GB/en-GB.ini");
        let (repo, _) = CatalogRepository::build(TreeWalker::default(), &[&file]);

        fs::write(&file, "AXS_PAY = \"Pay now\"\n").unwrap();
        assert_eq!(repo.reload_file(&file).unwrap(), 1);
        assert_eq!(repo.lookup_by_key("AXS_PAY", Scope::Site).as_deref(), Some("Pay now"));
        assert_eq!(repo.lookup_by_key("AXS_BACK", Scope::Site), None);

        fs::remove_file(&file).unwrap();
        assert_eq!(repo.reload_file(&file).unwrap(), 0);
        assert!(repo.read().is_empty());
    }

    #[test]
    fn clones_share_one_index_across_threads() {
        let repo = CatalogRepository::default();
        let writer = repo.clone();
        thread::spawn(move || {
            writer.append("AXS_SAVE", "Save", Scope::Site, "/x.ini", None);
        })
        .join()
        .unwrap();
        assert_eq!(repo.lookup_by_key("AXS_SAVE", Scope::Site).as_deref(), Some("Save"));

        repo.reset();
        assert!(repo.read().is_empty());
    }
}
