//! Text rewrites applied to a selection before it is written back.
//!
//! Everything here is pure apart from [`rewrite_accessor`], which reads the
//! index through [`KeyLookup`].

use crate::catalog::{CatalogIndex, CatalogRepository, Scope};
use crate::error::{CatalogError, Result};
use serde::Serialize;

const SINGLE: char = '\'';
const DOUBLE: char = '"';

/// Legacy and canonical accessor names used when rewriting translated text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessorStyle {
    pub legacy: String,
    pub canonical: String,
}

impl Default for AccessorStyle {
    fn default() -> Self {
        Self {
            legacy: "JText::_".to_string(),
            canonical: "AxsLanguage::text".to_string(),
        }
    }
}

impl AccessorStyle {
    /// `canonical("KEY", "value")`.
    pub fn canonical_accessor(&self, key: &str, value: &str) -> String {
        format!("{}(\"{key}\", \"{value}\")", self.canonical)
    }
}

/// Forward lookups used by accessor rewrites.
pub trait KeyLookup {
    fn value_for(&self, key: &str, scope: Scope) -> Option<String>;
}

impl KeyLookup for CatalogIndex {
    fn value_for(&self, key: &str, scope: Scope) -> Option<String> {
        self.lookup_by_key(key, scope).map(str::to_string)
    }
}

impl KeyLookup for CatalogRepository {
    fn value_for(&self, key: &str, scope: Scope) -> Option<String> {
        self.lookup_by_key(key, scope)
    }
}

/// Swap quote styles.
///
/// With both kinds present every single quote becomes a double quote; with
/// only one kind present it is converted to the other.
pub fn quote_swap(text: &str) -> String {
    let has_single = text.contains(SINGLE);
    let has_double = text.contains(DOUBLE);
    match (has_single, has_double) {
        (true, _) => text.replace(SINGLE, "\""),
        (false, true) => text.replace(DOUBLE, "'"),
        (false, false) => text.to_string(),
    }
}

/// Wrap text in a PHP echo block.
pub fn bracket_wrap(text: &str) -> String {
    format!("<?php echo {text}; ?>")
}

/// Strip one matching pair of surrounding quotes.
pub fn unquote(text: &str) -> &str {
    for quote in [SINGLE, DOUBLE] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Rewrite `legacy('KEY')` as `canonical("KEY", "value")`.
pub fn rewrite_accessor(
    text: &str,
    scope: Scope,
    lookup: &impl KeyLookup,
    style: &AccessorStyle,
) -> Result<String> {
    let key = legacy_key(text, &style.legacy).ok_or_else(|| CatalogError::UnrecognizedAccessor {
        text: text.to_string(),
    })?;
    let value = lookup
        .value_for(key, scope)
        .ok_or_else(|| CatalogError::NotFound {
            key: key.to_string(),
            scope,
        })?;
    Ok(style.canonical_accessor(key, &value))
}

fn legacy_key<'a>(text: &'a str, legacy: &str) -> Option<&'a str> {
    let args = text
        .trim()
        .strip_prefix(legacy)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?
        .trim();
    let key = unquote(args);
    if key.len() == args.len() || key.is_empty() {
        return None;
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_swap_prefers_double_when_mixed() {
        assert_eq!(
            quote_swap("He said 'hi' and \"bye\""),
            "He said \"hi\" and \"bye\""
        );
    }

    #[test]
    fn quote_swap_flips_a_single_kind() {
        assert_eq!(quote_swap("'Pay'"), "\"Pay\"");
        assert_eq!(quote_swap("\"Pay\""), "'Pay'");
        assert_eq!(quote_swap("Pay"), "Pay");
    }

    #[test]
    fn bracket_wrap_uses_echo_template() {
        assert_eq!(
            bracket_wrap("AxsLanguage::text(\"AXS_PAY\", \"Pay\")"),
            "<?php echo AxsLanguage::text(\"AXS_PAY\", \"Pay\"); ?>"
        );
    }

    #[test]
    fn unquote_strips_one_matching_pair() {
        assert_eq!(unquote("'Pay'"), "Pay");
        assert_eq!(unquote("\"Pay\""), "Pay");
        assert_eq!(unquote("\"'Pay'\""), "'Pay'");
        assert_eq!(unquote("'Pay\""), "'Pay\"");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("Pay"), "Pay");
    }

    #[test]
    fn rewrite_accessor_uses_active_scope() {
        let mut index = CatalogIndex::new();
        index.append("AXS_PAY", "Pay", Scope::Site, "/site.ini", None);
        let style = AccessorStyle::default();

        assert_eq!(
            rewrite_accessor("JText::_('AXS_PAY')", Scope::Site, &index, &style).unwrap(),
            "AxsLanguage::text(\"AXS_PAY\", \"Pay\")"
        );
        assert_eq!(
            rewrite_accessor(" JText::_(\"AXS_PAY\") ", Scope::Site, &index, &style).unwrap(),
            "AxsLanguage::text(\"AXS_PAY\", \"Pay\")"
        );
        assert!(matches!(
            rewrite_accessor("JText::_('AXS_PAY')", Scope::Administrator, &index, &style),
            Err(CatalogError::NotFound { scope: Scope::Administrator, .. })
        ));
    }

    #[test]
    fn rewrite_accessor_rejects_other_text() {
        let index = CatalogIndex::new();
        let style = AccessorStyle::default();
        for text in ["AXS_PAY", "JText::_(AXS_PAY)", "JText::_('')", "Other::_('AXS_PAY')"] {
            assert!(matches!(
                rewrite_accessor(text, Scope::Site, &index, &style),
                Err(CatalogError::UnrecognizedAccessor { .. })
            ));
        }
    }
}
