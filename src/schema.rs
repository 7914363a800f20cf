//! Schemas and schema-level header matching.
//!
//! A [`Schema`] is a named set of [`ColumnDefinition`]s describing one known
//! spreadsheet layout. [`Schema::match_headers`] resolves every definition
//! against an observed header row and returns a [`SchemaMatch`] carrying both
//! the verdict and the header to column mapping.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use log::debug;

use crate::{
    column::ColumnDefinition,
    error::{MatchError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Schema {
    name: String,
    columns: BTreeSet<ColumnDefinition>,
}

/// Outcome of matching one schema against one header row.
///
/// `matching_columns` maps each matched header to the definition that
/// claimed it. Unmatched optional columns are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaMatch {
    matches: bool,
    matching_columns: BTreeMap<String, ColumnDefinition>,
}

impl Schema {
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = ColumnDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &BTreeSet<ColumnDefinition> {
        &self.columns
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|column| column.is_required())
    }

    /// Resolves every column definition against `headers`.
    ///
    /// Each definition is evaluated exactly once; the verdict and the mapping
    /// are both derived from that single pass. Fails with
    /// [`MatchError::AmbiguousColumn`] when a pattern matches several headers
    /// and with [`MatchError::AmbiguousColumns`] when several definitions claim
    /// the same header.
    pub fn match_headers(&self, headers: &BTreeSet<String>) -> Result<SchemaMatch> {
        let resolved = self
            .columns
            .iter()
            .map(|column| column.find_match(headers).map(|found| (column, found)))
            .collect::<Result<Vec<_>>>()?;

        let mut claims: BTreeMap<&str, Vec<&ColumnDefinition>> = BTreeMap::new();
        for (column, found) in &resolved {
            if let Some(header) = found {
                claims.entry(*header).or_default().push(*column);
            }
        }

        let mut matching_columns = BTreeMap::new();
        for (header, columns) in claims {
            let [column] = columns.as_slice() else {
                return Err(MatchError::AmbiguousColumns {
                    schema: self.clone(),
                    header: header.to_string(),
                    columns: columns.iter().map(|column| (*column).clone()).collect(),
                });
            };
            matching_columns.insert(header.to_string(), (*column).clone());
        }

        let matches = resolved
            .iter()
            .all(|(column, found)| !column.is_required() || found.is_some());
        debug!(
            "Schema '{}' {} with {} of {} column(s) resolved",
            self.name,
            if matches { "matches" } else { "does not match" },
            matching_columns.len(),
            self.columns.len()
        );
        Ok(SchemaMatch {
            matches,
            matching_columns,
        })
    }

    /// Returns whether every required column is present in `headers`.
    pub fn matches(&self, headers: &BTreeSet<String>) -> Result<bool> {
        self.match_headers(headers).map(|result| result.matches)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl SchemaMatch {
    pub fn new(matches: bool, matching_columns: BTreeMap<String, ColumnDefinition>) -> Self {
        Self {
            matches,
            matching_columns,
        }
    }

    pub fn matches(&self) -> bool {
        self.matches
    }

    pub fn matching_columns(&self) -> &BTreeMap<String, ColumnDefinition> {
        &self.matching_columns
    }

    pub fn into_matching_columns(self) -> BTreeMap<String, ColumnDefinition> {
        self.matching_columns
    }

    /// Number of columns resolved to a header, required and optional alike.
    pub fn len(&self) -> usize {
        self.matching_columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matching_columns.is_empty()
    }

    /// The header a given definition was matched to.
    pub fn header_for(&self, column: &ColumnDefinition) -> Option<&str> {
        self.matching_columns
            .iter()
            .find(|(_, candidate)| *candidate == column)
            .map(|(header, _)| header.as_str())
    }
}
