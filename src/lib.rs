//! Identify which known spreadsheet layout a header row belongs to.
//!
//! Callers describe each layout as a [`Schema`]: a name plus a set of
//! [`ColumnDefinition`]s, each matched by exact header text or by a regular
//! expression and marked required or optional. Given the headers read from an
//! uploaded file, the ranking functions report which schemas fit and which
//! one fits best, along with the header each column was matched to.
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use any_columns::{ColumnDefinition, Schema, find_best_matching_schema};
//!
//! let orders = Schema::new(
//!     "orders",
//!     [
//!         ColumnDefinition::exact("order id"),
//!         ColumnDefinition::pattern("(?i)^total").unwrap().optional(),
//!     ],
//! );
//! let headers: BTreeSet<String> = ["order id", "Total (EUR)"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//!
//! let best = find_best_matching_schema([&orders], &headers).unwrap().unwrap();
//! assert_eq!(best.schema().name(), "orders");
//! assert_eq!(best.matched_count(), 2);
//! ```
//!
//! Ambiguity is never resolved silently. A pattern matching several headers,
//! two definitions claiming one header, or two schemas tying for best all
//! surface as [`MatchError`] variants.

pub mod catalog;
pub mod column;
pub mod error;
pub mod ranking;
pub mod schema;

pub use catalog::SchemaCatalog;
pub use column::{ColumnDefinition, ColumnMatcher, Pattern};
pub use error::{CatalogError, MatchError, Result};
pub use ranking::{
    RankedSchema, find_best_matching_schema, find_best_matching_schemas, find_matching_schemas,
};
pub use schema::{Schema, SchemaMatch};
