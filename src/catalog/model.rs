//! Entry types shared by the parser, walker and index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

/// Deployment area a catalog belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Scope {
    #[default]
    Site,
    Administrator,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Site, Scope::Administrator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Site => "site",
            Scope::Administrator => "administrator",
        }
    }
}

/// Component or module name that narrows a catalog below its scope.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsetId(pub String);

impl SubsetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubsetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Scope and optional subset derived from a path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeContext {
    pub scope: Scope,
    pub subset: Option<SubsetId>,
}

impl ScopeContext {
    pub fn new(scope: Scope, subset: Option<SubsetId>) -> Self {
        Self { scope, subset }
    }

    /// Context with no subset: only global entries of `scope` match.
    pub fn global(scope: Scope) -> Self {
        Self {
            scope,
            subset: None,
        }
    }
}

/// One indexed `KEY = "value"` mapping and where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    pub value: String,
    pub source_path: PathBuf,
    pub scope: Scope,
    pub subset: Option<SubsetId>,
}

impl CatalogEntry {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        source_path: impl Into<PathBuf>,
        context: &ScopeContext,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source_path: source_path.into(),
            scope: context.scope,
            subset: context.subset.clone(),
        }
    }

    /// Global entries are visible to every subset; scoped ones only to their own.
    pub fn visible_to(&self, subset: Option<&SubsetId>) -> bool {
        match &self.subset {
            None => true,
            Some(own) => subset == Some(own),
        }
    }

    pub fn is_from(&self, path: &Path) -> bool {
        self.source_path == path
    }
}

/// Reverse-lookup result handed to callers choosing a replacement key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub key: String,
    pub source_path: PathBuf,
}

impl From<&CatalogEntry> for Candidate {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            key: entry.key.clone(),
            source_path: entry.source_path.clone(),
        }
    }
}

/// Returns true when `key` matches `[A-Z0-9_]+`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
