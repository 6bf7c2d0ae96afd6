//! Bidirectional in-memory index over loaded catalog entries.
//!
//! Each scope keeps a forward map (key → entries, newest last) and a reverse
//! map (display value → entries in discovery order). Both maps share the same
//! slot so removing a source file prunes them together.
//! Duplicate keys and duplicate values are expected: override catalogs
//! redefine base keys, and many keys share a display string.
//!
//! Every source file gets a rank the first time it is seen. Buckets stay
//! ordered by rank, so re-loading a file puts its entries back where they
//! were instead of after files loaded later.

use crate::catalog::{CatalogEntry, Scope, ScopeContext, SubsetId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
struct Slot {
    rank: u64,
    entry: CatalogEntry,
}

type Bucket = Vec<Arc<Slot>>;

#[derive(Debug, Default)]
struct ScopeTable {
    forward: BTreeMap<String, Bucket>,
    reverse: BTreeMap<String, Bucket>,
}

impl ScopeTable {
    fn insert(&mut self, slot: Arc<Slot>) {
        let forward = self.forward.entry(slot.entry.key.clone()).or_default();
        place(forward, Arc::clone(&slot));
        let reverse = self.reverse.entry(slot.entry.value.clone()).or_default();
        place(reverse, slot);
    }

    fn remove_source(&mut self, path: &Path) -> usize {
        let removed = prune(&mut self.reverse, path);
        let forward_removed = prune(&mut self.forward, path);
        debug_assert_eq!(removed, forward_removed);
        removed
    }

    fn len(&self) -> usize {
        self.reverse.values().map(Vec::len).sum()
    }
}

// After every slot of lower or equal rank, so lines of one file keep file order.
fn place(bucket: &mut Bucket, slot: Arc<Slot>) {
    let at = bucket.partition_point(|held| held.rank <= slot.rank);
    bucket.insert(at, slot);
}

fn prune(map: &mut BTreeMap<String, Bucket>, path: &Path) -> usize {
    let mut removed = 0;
    map.retain(|_, bucket| {
        let before = bucket.len();
        bucket.retain(|slot| !slot.entry.is_from(path));
        removed += before - bucket.len();
        !bucket.is_empty()
    });
    removed
}

/// Entry counts for one scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeStats {
    pub entries: usize,
    pub keys: usize,
    pub values: usize,
}

#[derive(Debug, Default)]
/// Forward and reverse lookup tables for both scopes.
pub struct CatalogIndex {
    site: ScopeTable,
    administrator: ScopeTable,
    sources: BTreeSet<PathBuf>,
    // Kept across removals so a reloaded file regains its position.
    ranks: BTreeMap<PathBuf, u64>,
    next_rank: u64,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, scope: Scope) -> &ScopeTable {
        match scope {
            Scope::Site => &self.site,
            Scope::Administrator => &self.administrator,
        }
    }

    fn table_mut(&mut self, scope: Scope) -> &mut ScopeTable {
        match scope {
            Scope::Site => &mut self.site,
            Scope::Administrator => &mut self.administrator,
        }
    }

    fn rank_of(&mut self, path: &Path) -> u64 {
        if let Some(rank) = self.ranks.get(path) {
            return *rank;
        }
        let rank = self.next_rank;
        self.next_rank += 1;
        self.ranks.insert(path.to_path_buf(), rank);
        rank
    }

    fn insert(&mut self, entry: CatalogEntry) {
        let rank = self.rank_of(&entry.source_path);
        self.sources.insert(entry.source_path.clone());
        let scope = entry.scope;
        self.table_mut(scope).insert(Arc::new(Slot { rank, entry }));
    }

    /// Insert a batch of entries, each under its own scope.
    ///
    /// The forward map answers with the entry from the latest-ranked source
    /// for a key; the reverse map accumulates, never overwrites. A source
    /// seen before (even if since removed) keeps its original rank. Returns the number of
    /// entries inserted.
    pub fn load<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut count = 0;
        for entry in entries {
            self.insert(entry);
            count += 1;
        }
        count
    }

    /// Add a single mapping without checking for key collisions.
    pub fn append(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        scope: Scope,
        source_path: impl Into<PathBuf>,
        subset: Option<SubsetId>,
    ) {
        let context = ScopeContext::new(scope, subset);
        self.insert(CatalogEntry::new(key, value, source_path, &context));
    }

    /// Remove every entry loaded from `path`, in all scopes.
    ///
    /// Keys that were overridden by the removed file fall back to the
    /// previously loaded definition. Returns the number of entries removed.
    pub fn remove_by_source(&mut self, path: &Path) -> usize {
        if !self.sources.remove(path) {
            return 0;
        }
        Scope::ALL
            .iter()
            .map(|scope| self.table_mut(*scope).remove_source(path))
            .sum()
    }

    /// Entries whose display value is exactly `value`, in discovery order.
    ///
    /// Only global entries and entries of `subset` are returned. A miss is an
    /// empty vector.
    pub fn lookup_by_value(
        &self,
        value: &str,
        scope: Scope,
        subset: Option<&SubsetId>,
    ) -> Vec<&CatalogEntry> {
        self.table(scope)
            .reverse
            .get(value)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|slot| &slot.entry)
                    .filter(|entry| entry.visible_to(subset))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The current value of `key` in `scope` (latest-ranked definition wins).
    pub fn lookup_by_key(&self, key: &str, scope: Scope) -> Option<&str> {
        self.table(scope)
            .forward
            .get(key)
            .and_then(|stack| stack.last())
            .map(|slot| slot.entry.value.as_str())
    }

    /// Source files currently contributing entries, in path order.
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(PathBuf::as_path)
    }

    /// Source files located at or below `root`.
    pub fn sources_under(&self, root: &Path) -> Vec<PathBuf> {
        self.sources
            .iter()
            .filter(|source| source.starts_with(root))
            .cloned()
            .collect()
    }

    /// All entries attributed to `path`, grouped by scope then display value.
    pub fn entries_from(&self, path: &Path) -> Vec<&CatalogEntry> {
        Scope::ALL
            .iter()
            .flat_map(|scope| self.table(*scope).reverse.values())
            .flatten()
            .map(|slot| &slot.entry)
            .filter(|entry| entry.is_from(path))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.site.len() + self.administrator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self, scope: Scope) -> ScopeStats {
        let table = self.table(scope);
        ScopeStats {
            entries: table.len(),
            keys: table.forward.len(),
            values: table.reverse.len(),
        }
    }

    /// Drop every entry, source and rank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
