#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Once;

use any_columns::ColumnDefinition;

static LOGGER: Once = Once::new();

/// Routes library logging through the test harness; honours `RUST_LOG`.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Builds a header set from string literals.
pub fn headers(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Builds an expected header to column mapping.
pub fn mapping(entries: &[(&str, &ColumnDefinition)]) -> BTreeMap<String, ColumnDefinition> {
    entries
        .iter()
        .map(|(header, column)| (header.to_string(), (*column).clone()))
        .collect()
}
