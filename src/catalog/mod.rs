//! Localization catalog wiring.
//!
//! This module turns a tree of INI-style language files (for example
//! `language/en-GB/en-GB.com_axs.ini`) into a bidirectional index. The walker
//! finds catalogs, the parser extracts `KEY = "value"` lines, the scope
//! resolver tags each file as site or administrator (plus an optional
//! component subset), and `CatalogIndex` answers key → value and value → keys.
//! Callers normally go through `CatalogRepository`, which shares one index
//! behind a lock and owns the reload lifecycle.

pub mod index;
pub mod model;
pub mod parser;
pub mod repository;
pub mod scope;
pub mod walker;

pub use index::{CatalogIndex, ScopeStats};
pub use model::{Candidate, CatalogEntry, Scope, ScopeContext, SubsetId, is_valid_key};
pub use parser::{CatalogLine, CatalogParser, LineKind, classify_line, parse_catalog};
pub use repository::CatalogRepository;
pub use scope::{resolve_scope, resolve_scope_within};
pub use walker::{CatalogFile, DEFAULT_EXTENSION, PathKind, TreeWalker, WalkReport, classify_path};
