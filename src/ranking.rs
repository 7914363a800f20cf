//! Choosing between schemas for one header row.
//!
//! Schemas that miss a required column are excluded outright. The rest are
//! ranked by how many of their columns resolved to a header; optional columns
//! count the same as required ones.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    iter,
};

use itertools::Itertools;
use log::debug;

use crate::{
    column::ColumnDefinition,
    error::{MatchError, Result},
    schema::Schema,
};

/// A matching schema together with the header to column mapping it produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RankedSchema {
    schema: Schema,
    matching_columns: BTreeMap<String, ColumnDefinition>,
}

impl RankedSchema {
    pub fn new(schema: Schema, matching_columns: BTreeMap<String, ColumnDefinition>) -> Self {
        Self {
            schema,
            matching_columns,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn matching_columns(&self) -> &BTreeMap<String, ColumnDefinition> {
        &self.matching_columns
    }

    pub fn matched_count(&self) -> usize {
        self.matching_columns.len()
    }

    pub fn into_parts(self) -> (Schema, BTreeMap<String, ColumnDefinition>) {
        (self.schema, self.matching_columns)
    }
}

/// Returns every schema whose required columns are all present in `headers`.
pub fn find_matching_schemas<'a, I>(
    schemas: I,
    headers: &BTreeSet<String>,
) -> Result<BTreeSet<Schema>>
where
    I: IntoIterator<Item = &'a Schema>,
{
    let mut matching = BTreeSet::new();
    for schema in schemas {
        if schema.matches(headers)? {
            matching.insert(schema.clone());
        }
    }
    Ok(matching)
}

/// Returns the matching schemas ordered by matched column count, best first.
///
/// Ties keep the iteration order of `schemas`; a schema passed more than once
/// is ranked once. Use [`find_best_matching_schema`] when a single winner is
/// required.
pub fn find_best_matching_schemas<'a, I>(
    schemas: I,
    headers: &BTreeSet<String>,
) -> Result<Vec<RankedSchema>>
where
    I: IntoIterator<Item = &'a Schema>,
{
    let mut ranked = Vec::new();
    for schema in schemas.into_iter().unique() {
        let result = schema.match_headers(headers)?;
        if result.matches() {
            ranked.push(RankedSchema::new(
                schema.clone(),
                result.into_matching_columns(),
            ));
        }
    }
    debug!("{} schema(s) match {} header(s)", ranked.len(), headers.len());
    Ok(ranked
        .into_iter()
        .sorted_by_key(|entry| Reverse(entry.matched_count()))
        .collect())
}

/// Returns the single schema with the most matched columns.
///
/// `Ok(None)` means no schema matched. Several schemas sharing the highest
/// count fail with [`MatchError::AmbiguousMatch`] listing all of them.
pub fn find_best_matching_schema<'a, I>(
    schemas: I,
    headers: &BTreeSet<String>,
) -> Result<Option<RankedSchema>>
where
    I: IntoIterator<Item = &'a Schema>,
{
    let mut ranked = find_best_matching_schemas(schemas, headers)?.into_iter();
    let Some(best) = ranked.next() else {
        return Ok(None);
    };
    let best_count = best.matched_count();
    // Ranked entries are sorted descending, so the ties are a prefix.
    let ties = ranked
        .take_while(|entry| entry.matched_count() == best_count)
        .collect::<Vec<_>>();
    if ties.is_empty() {
        debug!("Best match is '{}' with {} column(s)", best.schema(), best_count);
        return Ok(Some(best));
    }
    Err(MatchError::AmbiguousMatch {
        matches: iter::once(best).chain(ties).collect(),
    })
}
