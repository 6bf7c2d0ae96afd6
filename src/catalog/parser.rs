//! Line-oriented parser for `KEY = "value"` catalog files.
//!
//! Parsing is permissive: anything that is not a single-`=` entry line is
//! skipped without error. The parser borrows the file content and yields
//! entries lazily; calling [`parse_catalog`] again on the same content yields
//! the same sequence.

const COMMENT_MARKER: char = ';';
const SEPARATOR: char = '=';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Classification of a single catalog line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    Entry { key: &'a str, value: String },
    Skip,
}

/// Classify one line of a catalog file.
///
/// A line is an entry iff it holds exactly one `=` and is not a comment. The
/// key is the trimmed left side; the value is the trimmed right side with
/// every double quote removed. Key syntax is not checked here.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.starts_with(COMMENT_MARKER) {
        return LineKind::Comment;
    }

    let mut parts = line.split(SEPARATOR);
    let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
        return LineKind::Skip;
    };

    LineKind::Entry {
        key: left.trim(),
        value: right.trim().replace('"', ""),
    }
}

/// One parsed entry with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogLine {
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Lazy iterator over the entries of one catalog file.
#[derive(Clone, Debug)]
pub struct CatalogParser<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl Iterator for CatalogParser<'_> {
    type Item = CatalogLine;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            if let LineKind::Entry { key, value } = classify_line(raw) {
                return Some(CatalogLine {
                    line: idx + 1,
                    key: key.to_string(),
                    value,
                });
            }
        }
        None
    }
}

/// Parse catalog content into its entries.
pub fn parse_catalog(content: &str) -> CatalogParser<'_> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    CatalogParser {
        lines: content.lines().enumerate(),
    }
}
