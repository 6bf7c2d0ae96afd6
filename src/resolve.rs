//! Candidate lookup and variable creation for a selected literal.
//!
//! `find_candidates` answers "which keys already display this text here?";
//! `create_variable` adds a new key when none fits. Variable creation updates
//! the index before touching disk: when the append fails the index is ahead
//! of the file until the caller reloads that file.

use crate::catalog::{Candidate, CatalogRepository, ScopeContext, is_valid_key};
use crate::error::{CatalogError, Result};
use crate::transform::AccessorStyle;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{info, warn};

/// Query context of the file being edited, resolved the way `repo` resolves
/// its catalogs.
pub fn context_for(repo: &CatalogRepository, path: &Path) -> ScopeContext {
    repo.walker().context_for(path)
}

/// Keys whose value is exactly `literal`, in discovery order.
pub fn find_candidates(
    repo: &CatalogRepository,
    literal: &str,
    context: &ScopeContext,
) -> Vec<Candidate> {
    repo.read()
        .lookup_by_value(literal, context.scope, context.subset.as_ref())
        .into_iter()
        .map(Candidate::from)
        .collect()
}

/// Replacement text for a selection once a key has been chosen.
pub fn replacement_for(key: &str, literal: &str, style: &AccessorStyle) -> String {
    style.canonical_accessor(key, literal)
}

/// Add `KEY = "literal"` to the index and append it to `target`.
///
/// Validation failures leave both the index and the file untouched. The
/// target file must already exist; it is never created.
pub fn create_variable(
    repo: &CatalogRepository,
    key: &str,
    literal: &str,
    target: &Path,
) -> Result<()> {
    if !is_valid_key(key) {
        return Err(CatalogError::InvalidKeySyntax {
            key: key.to_string(),
        });
    }
    if literal.contains(['"', '\n', '\r']) {
        return Err(CatalogError::InvalidValue {
            value: literal.to_string(),
        });
    }
    if !fs::metadata(target).is_ok_and(|meta| meta.is_file()) {
        return Err(CatalogError::MissingTarget {
            path: target.to_path_buf(),
        });
    }

    let context = repo.walker().context_for(target);
    repo.append(key, literal, context.scope, target, context.subset.clone());

    append_line(target, &format!("{key} = \"{literal}\"\n")).map_err(|source| {
        warn!(
            path = %target.display(),
            key,
            error = %source,
            "variable indexed but not written; reload the target to reconcile"
        );
        CatalogError::WriteFailure {
            path: target.to_path_buf(),
            source,
        }
    })?;

    info!(path = %target.display(), key, scope = %context.scope, "created variable");
    Ok(())
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;
    let mut prefix = "";
    if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            prefix = "\n";
        }
    }
    file.write_all(format!("{prefix}{line}").as_bytes())
}
