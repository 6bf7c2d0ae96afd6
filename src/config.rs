//! Scan configuration derived from a workspace root and the environment.
//!
//! The default layout mirrors a CMS checkout: site catalogs under
//! `language/en-GB`, site overrides under `language/overrides`, and the whole
//! `administrator/language` tree (which holds its own `overrides`). Roots are
//! walked in that order so overrides load after the base catalogs and win
//! forward lookups.

use crate::catalog::{CatalogRepository, DEFAULT_EXTENSION, TreeWalker, WalkReport};
use crate::split_list;
use crate::transform::AccessorStyle;
use std::env;
use std::path::{Path, PathBuf};

pub const SITE_LANGUAGE_DIR: &str = "language/en-GB";
pub const SITE_OVERRIDES_DIR: &str = "language/overrides";
pub const ADMINISTRATOR_LANGUAGE_DIR: &str = "administrator/language";

pub const ENV_ROOTS: &str = "LANGSCOPE_ROOTS";
pub const ENV_EXTENSION: &str = "LANGSCOPE_EXTENSION";
pub const ENV_LEGACY_ACCESSOR: &str = "LANGSCOPE_LEGACY_ACCESSOR";
pub const ENV_ACCESSOR: &str = "LANGSCOPE_ACCESSOR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub workspace_root: PathBuf,
    pub roots: Vec<PathBuf>,
    pub extension: String,
    pub accessor: AccessorStyle,
}

impl CatalogConfig {
    /// Default layout for `workspace_root`.
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            roots: default_roots(workspace_root),
            extension: DEFAULT_EXTENSION.to_string(),
            accessor: AccessorStyle::default(),
        }
    }

    /// Default layout adjusted by `LANGSCOPE_*` environment variables.
    pub fn from_env(workspace_root: &Path) -> Self {
        Self::for_workspace(workspace_root).with_overrides(|name| {
            env::var(name).ok().filter(|value| !value.trim().is_empty())
        })
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_ROOTS) {
            let roots = split_list(&raw);
            if !roots.is_empty() {
                self = self.with_roots(roots);
            }
        }
        if let Some(extension) = lookup(ENV_EXTENSION) {
            self.extension = extension.trim().trim_start_matches('.').to_string();
        }
        if let Some(legacy) = lookup(ENV_LEGACY_ACCESSOR) {
            self.accessor.legacy = legacy.trim().to_string();
        }
        if let Some(canonical) = lookup(ENV_ACCESSOR) {
            self.accessor.canonical = canonical.trim().to_string();
        }
        self
    }

    /// Replace the scan roots; relative roots are resolved against the
    /// workspace root.
    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.roots = roots
            .into_iter()
            .map(|root| self.workspace_root.join(root.as_ref()))
            .collect();
        self
    }

    pub fn walker(&self) -> TreeWalker {
        TreeWalker::new(self.extension.clone()).with_workspace_root(&self.workspace_root)
    }

    /// Walk the configured roots into a fresh repository.
    pub fn build_repository(&self) -> (CatalogRepository, WalkReport) {
        CatalogRepository::build(self.walker(), self.roots.as_slice())
    }
}

/// Scan roots of the default layout, in load order.
pub fn default_roots(workspace_root: &Path) -> Vec<PathBuf> {
    [SITE_LANGUAGE_DIR, SITE_OVERRIDES_DIR, ADMINISTRATOR_LANGUAGE_DIR]
        .iter()
        .map(|rel| workspace_root.join(rel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn default_layout_loads_overrides_after_base() {
        let config = CatalogConfig::for_workspace(Path::new("/ws"));
        assert_eq!(
            config.roots,
            vec![
                PathBuf::from("/ws/language/en-GB"),
                PathBuf::from("/ws/language/overrides"),
                PathBuf::from("/ws/administrator/language"),
            ]
        );
        assert_eq!(config.extension, "ini");
    }

    #[test]
    fn overrides_replace_roots_and_accessors() {
        let vars: BTreeMap<&str, &str> = BTreeMap::from([
            (ENV_ROOTS, "custom/lang, /abs/admin/language"),
            (ENV_EXTENSION, ".lang"),
            (ENV_ACCESSOR, "Text::get"),
        ]);
        let config = CatalogConfig::for_workspace(Path::new("/ws"))
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.roots,
            vec![
                PathBuf::from("/ws/custom/lang"),
                PathBuf::from("/abs/admin/language"),
            ]
        );
        assert_eq!(config.extension, "lang");
        assert_eq!(config.accessor.canonical, "Text::get");
        assert_eq!(config.accessor.legacy, "JText::_");
    }
}
