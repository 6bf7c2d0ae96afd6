//! Derives a catalog's scope and subset from its location on disk.
//!
//! Both rules are naming heuristics over the CMS directory layout:
//! administrator catalogs live under an `administrator` directory, and
//! component/module catalogs carry a `com_*` or `mod_*` name either as a
//! directory or as a dotted part of the file name
//! (`en-GB.com_axs.ini`).
//!
//! Only the part of the path below the workspace root is inspected when one
//! is known, so a checkout under `/srv/administrator-portal` or
//! `/home/u/com_site` does not taint every catalog in it.

use crate::catalog::{Scope, ScopeContext, SubsetId};
use std::path::{Component, Path};

const ADMINISTRATOR_MARKER: &str = "administrator";
const SUBSET_PREFIXES: &[&str] = &["com_", "mod_"];

/// Resolve scope and subset from the part of `path` below `workspace_root`.
/// Paths outside the workspace are resolved whole.
pub fn resolve_scope_within(path: &Path, workspace_root: &Path) -> ScopeContext {
    resolve_scope(path.strip_prefix(workspace_root).unwrap_or(path))
}

/// Resolve scope and subset for a file or directory path.
pub fn resolve_scope(path: &Path) -> ScopeContext {
    let names: Vec<&str> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();

    let scope = if names.iter().any(|name| name.contains(ADMINISTRATOR_MARKER)) {
        Scope::Administrator
    } else {
        Scope::Site
    };

    let subset = names
        .iter()
        .flat_map(|name| name.split('.'))
        .find(|piece| SUBSET_PREFIXES.iter().any(|prefix| piece.starts_with(prefix)))
        .map(SubsetId::from);

    ScopeContext { scope, subset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_catalog_has_no_subset() {
        let ctx = resolve_scope(Path::new("/ws/language/en-GB/en-GB.ini"));
        assert_eq!(ctx, ScopeContext::global(Scope::Site));
    }

    #[test]
    fn administrator_segment_selects_administrator_scope() {
        let ctx = resolve_scope(Path::new("/ws/administrator/language/en-GB/en-GB.ini"));
        assert_eq!(ctx.scope, Scope::Administrator);
        assert!(ctx.subset.is_none());
    }

    #[test]
    fn subset_comes_from_dotted_file_name() {
        let ctx = resolve_scope(Path::new("/ws/language/en-GB/en-GB.com_axs.ini"));
        assert_eq!(ctx.subset, Some(SubsetId::from("com_axs")));

        let ctx = resolve_scope(Path::new("/ws/language/en-GB/en-GB.mod_login.sys.ini"));
        assert_eq!(ctx.subset, Some(SubsetId::from("mod_login")));
    }

    #[test]
    fn first_subset_segment_wins() {
        let ctx = resolve_scope(Path::new(
            "/ws/administrator/components/com_axs/language/en-GB/en-GB.mod_menu.ini",
        ));
        assert_eq!(ctx.scope, Scope::Administrator);
        assert_eq!(ctx.subset, Some(SubsetId::from("com_axs")));
    }

    #[test]
    fn workspace_prefix_is_ignored() {
        let root = Path::new("/srv/administrator-portal/com_site");
        let ctx = resolve_scope_within(&root.join("language/en-GB/en-GB.ini"), root);
        assert_eq!(ctx, ScopeContext::global(Scope::Site));

        let ctx = resolve_scope_within(
            &root.join("administrator/language/en-GB/en-GB.com_axs.ini"),
            root,
        );
        assert_eq!(ctx.scope, Scope::Administrator);
        assert_eq!(ctx.subset, Some(SubsetId::from("com_axs")));

        let outside = resolve_scope_within(Path::new("/other/administrator/a.ini"), root);
        assert_eq!(outside.scope, Scope::Administrator);
    }

    #[test]
    fn words_containing_prefix_letters_are_not_subsets() {
        let ctx = resolve_scope(Path::new("/home/compiler/models/language/en-GB.ini"));
        assert!(ctx.subset.is_none());
    }
}
