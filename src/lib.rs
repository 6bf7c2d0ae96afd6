use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod error;
pub mod resolve;
pub mod telemetry;
pub mod transform;

pub use catalog::{
    Candidate, CatalogEntry, CatalogIndex, CatalogRepository, Scope, ScopeContext, SubsetId,
    TreeWalker, WalkReport,
};
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use resolve::{context_for, create_variable, find_candidates, replacement_for};
pub use transform::{
    AccessorStyle, KeyLookup, bracket_wrap, quote_swap, rewrite_accessor, unquote,
};

const LANGUAGE_DIR: &str = "language";
const ENV_WORKSPACE_ROOT: &str = "LANGSCOPE_ROOT";

// A checkout root holds `language/` with at least one locale or overrides
// directory; a bare `language/` folder in some project is not enough.
fn is_workspace_root(candidate: &Path) -> bool {
    fs::read_dir(candidate.join(LANGUAGE_DIR)).is_ok_and(|entries| {
        entries
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
    })
}

fn workspace_root_from_hint(hint: &str) -> Option<PathBuf> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }
    let root = fs::canonicalize(hint).ok()?;
    is_workspace_root(&root).then_some(root)
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).ok()?;
    start.ancestors().find(|dir| is_workspace_root(dir)).map(Path::to_path_buf)
}

/// Locate the CMS checkout whose `language/` tree should be indexed.
///
/// Checks `LANGSCOPE_ROOT`, then walks up from the current directory, then
/// falls back to the build-time `LANGSCOPE_ROOT_HINT`.
pub fn find_workspace_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ENV_WORKSPACE_ROOT) {
        if let Some(root) = workspace_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("LANGSCOPE_ROOT_HINT") {
        if let Some(root) = workspace_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate a workspace with a populated language/ directory. Set {ENV_WORKSPACE_ROOT} or pass --workspace."
    );
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
