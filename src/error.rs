//! Error types for header matching and schema catalog loading.
//!
//! [`MatchError`] covers the three ambiguity outcomes of matching. None of
//! them is transient: the same schemas and headers always produce the same
//! error, and resolving one needs a decision the library cannot make (tighten a
//! pattern, drop a schema, prefer one schema over another).

use std::collections::BTreeSet;

use itertools::Itertools;
use thiserror::Error;

use crate::{column::ColumnDefinition, ranking::RankedSchema, schema::Schema};

pub type Result<T, E = MatchError> = std::result::Result<T, E>;

/// Ambiguity detected while matching headers against schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A single column definition matched more than one header.
    #[error("column {column} matches more than one header: {}", quoted(.headers))]
    AmbiguousColumn {
        column: ColumnDefinition,
        headers: BTreeSet<String>,
    },

    /// Two or more column definitions of one schema matched the same header.
    #[error(
        "schema '{schema}' has {} column definitions matching header '{header}': {}",
        .columns.len(),
        .columns.iter().join(", ")
    )]
    AmbiguousColumns {
        schema: Schema,
        header: String,
        columns: BTreeSet<ColumnDefinition>,
    },

    /// Several schemas tie for the highest number of matched columns.
    #[error(
        "{} schemas tie for best match: {}",
        .matches.len(),
        .matches.iter().map(|m| format!("'{}'", m.schema().name())).join(", ")
    )]
    AmbiguousMatch { matches: BTreeSet<RankedSchema> },
}

/// Problems found while loading a schema catalog from configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The YAML text is malformed or has unknown fields.
    #[error("failed to parse schema catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A column pattern is not a valid regular expression.
    #[error("invalid column pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A column entry gave neither `header` nor `pattern`.
    #[error("schema '{schema}' has a column with neither `header` nor `pattern`")]
    MissingMatcher { schema: String },

    /// A column entry gave both `header` and `pattern`.
    #[error("schema '{schema}' has a column with both `header` and `pattern`")]
    ConflictingMatcher { schema: String },

    /// Two schemas share the same name.
    #[error("schema name '{name}' is defined more than once")]
    DuplicateSchema { name: String },

    /// A schema name is empty or only whitespace.
    #[error("schema names must not be empty")]
    EmptySchemaName,
}

fn quoted(values: &BTreeSet<String>) -> String {
    values.iter().map(|value| format!("'{value}'")).join(", ")
}
