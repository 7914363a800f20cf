//! Column definitions and single-column header matching.
//!
//! A [`ColumnDefinition`] identifies one expected column either by an exact
//! header string or by a regular expression. Patterns use search semantics: a
//! pattern matches a header when it is found anywhere inside it, so anchor it
//! with `^` and `$` to require the whole header. Prefer exact columns where
//! possible; they resolve with a set lookup instead of scanning every header.

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
};

use log::trace;
use regex::Regex;

use crate::error::{CatalogError, MatchError, Result};

/// A compiled regular expression compared by its source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, CatalogError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| CatalogError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_regex(&self) -> &Regex {
        &self.0
    }

    pub fn is_match(&self, header: &str) -> bool {
        self.0.is_match(header)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/// How a column definition recognises its header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnMatcher {
    Exact(String),
    Pattern(Pattern),
}

/// One expected column of a schema.
///
/// Two definitions are equal when both the matcher and the `required` flag
/// are equal, so a schema may hold a required and an optional definition for
/// the same header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnDefinition {
    matcher: ColumnMatcher,
    required: bool,
}

impl ColumnDefinition {
    /// A required column identified by an exact header string.
    pub fn exact(header: impl Into<String>) -> Self {
        Self {
            matcher: ColumnMatcher::Exact(header.into()),
            required: true,
        }
    }

    /// A required column identified by a regular expression.
    pub fn pattern(pattern: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_pattern(Pattern::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self::from_pattern(Pattern::from(regex))
    }

    fn from_pattern(pattern: Pattern) -> Self {
        Self {
            matcher: ColumnMatcher::Pattern(pattern),
            required: true,
        }
    }

    pub fn optional(self) -> Self {
        self.with_required(false)
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn matcher(&self) -> &ColumnMatcher {
        &self.matcher
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Finds the header this column corresponds to, if any.
    ///
    /// Exact columns never fail. A pattern that matches more than one header
    /// returns [`MatchError::AmbiguousColumn`].
    pub fn find_match<'h>(&self, headers: &'h BTreeSet<String>) -> Result<Option<&'h str>> {
        let found = match &self.matcher {
            ColumnMatcher::Exact(header) => headers.get(header.as_str()).map(String::as_str),
            ColumnMatcher::Pattern(pattern) => {
                let candidates = headers
                    .iter()
                    .map(String::as_str)
                    .filter(|header| pattern.is_match(header))
                    .collect::<Vec<_>>();
                match candidates.as_slice() {
                    [] => None,
                    [header] => Some(*header),
                    _ => {
                        return Err(MatchError::AmbiguousColumn {
                            column: self.clone(),
                            headers: candidates.iter().map(|h| h.to_string()).collect(),
                        });
                    }
                }
            }
        };
        trace!("Column {} resolved to {:?}", self, found);
        Ok(found)
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            ColumnMatcher::Exact(header) => write!(f, "\"{header}\"")?,
            ColumnMatcher::Pattern(pattern) => write!(f, "/{}/", pattern.as_str())?,
        }
        if !self.required {
            f.write_str(" (optional)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn exact_column_returns_present_header() {
        let column = ColumnDefinition::exact("column a");
        let given = headers(&["column a", "column b"]);
        assert_eq!(column.find_match(&given).unwrap(), Some("column a"));
        assert_eq!(column.find_match(&headers(&["column b"])).unwrap(), None);
    }

    #[test]
    fn exact_column_is_case_sensitive() {
        let column = ColumnDefinition::exact("Amount");
        assert_eq!(column.find_match(&headers(&["amount"])).unwrap(), None);
    }

    #[test]
    fn pattern_searches_inside_headers() {
        let column = ColumnDefinition::pattern("mount").unwrap();
        let given = headers(&["Total Amount", "Date"]);
        assert_eq!(column.find_match(&given).unwrap(), Some("Total Amount"));
    }

    #[test]
    fn anchored_pattern_requires_whole_header() {
        let column = ColumnDefinition::pattern("^Amount$").unwrap();
        assert_eq!(column.find_match(&headers(&["Total Amount"])).unwrap(), None);
        assert_eq!(
            column.find_match(&headers(&["Amount", "Total Amount"])).unwrap(),
            Some("Amount")
        );
    }

    #[test]
    fn pattern_matching_two_headers_is_ambiguous() {
        let column = ColumnDefinition::pattern("(?i)amount").unwrap();
        let err = column
            .find_match(&headers(&["Net Amount", "Gross Amount", "Date"]))
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::AmbiguousColumn {
                column,
                headers: headers(&["Gross Amount", "Net Amount"]),
            }
        );
    }

    #[test]
    fn equality_includes_required_flag() {
        assert_eq!(ColumnDefinition::exact("a"), ColumnDefinition::exact("a"));
        assert_ne!(
            ColumnDefinition::exact("a"),
            ColumnDefinition::exact("a").optional()
        );
        assert_eq!(
            ColumnDefinition::pattern("^a").unwrap(),
            ColumnDefinition::from_regex(Regex::new("^a").unwrap())
        );
    }

    #[test]
    fn exact_and_pattern_with_same_text_differ() {
        assert_ne!(
            ColumnDefinition::exact("a"),
            ColumnDefinition::pattern("a").unwrap()
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = ColumnDefinition::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn display_marks_kind_and_optional() {
        assert_eq!(ColumnDefinition::exact("id").to_string(), "\"id\"");
        assert_eq!(
            ColumnDefinition::pattern("^id$").unwrap().optional().to_string(),
            "/^id$/ (optional)"
        );
    }
}
