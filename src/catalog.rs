//! Schema catalogs loaded from YAML configuration.
//!
//! A catalog lists the known layouts an application accepts:
//!
//! ```yaml
//! schemas:
//!   - name: invoices
//!     columns:
//!       - header: Invoice Number
//!       - pattern: "(?i)^amount"
//!         required: false
//! ```
//!
//! Each column gives exactly one of `header` (exact match) or `pattern`
//! (regular expression, searched anywhere in the header). `required`
//! defaults to `true`.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    column::{ColumnDefinition, ColumnMatcher},
    error::{CatalogError, Result},
    ranking::{self, RankedSchema},
    schema::Schema,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    #[serde(default)]
    pub schemas: Vec<SchemaSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SchemaSpec {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default = "ColumnSpec::default_required")]
    pub required: bool,
}

impl ColumnSpec {
    fn default_required() -> bool {
        true
    }

    fn build(&self, schema: &str) -> Result<ColumnDefinition, CatalogError> {
        let column = match (&self.header, &self.pattern) {
            (Some(header), None) => ColumnDefinition::exact(header.as_str()),
            (None, Some(pattern)) => ColumnDefinition::pattern(pattern)?,
            (None, None) => {
                return Err(CatalogError::MissingMatcher {
                    schema: schema.to_string(),
                });
            }
            (Some(_), Some(_)) => {
                return Err(CatalogError::ConflictingMatcher {
                    schema: schema.to_string(),
                });
            }
        };
        Ok(column.with_required(self.required))
    }
}

impl From<&ColumnDefinition> for ColumnSpec {
    fn from(column: &ColumnDefinition) -> Self {
        let (header, pattern) = match column.matcher() {
            ColumnMatcher::Exact(header) => (Some(header.clone()), None),
            ColumnMatcher::Pattern(pattern) => (None, Some(pattern.as_str().to_string())),
        };
        Self {
            header,
            pattern,
            required: column.is_required(),
        }
    }
}

impl SchemaSpec {
    pub fn build(&self) -> Result<Schema, CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptySchemaName);
        }
        let columns = self
            .columns
            .iter()
            .map(|column| column.build(&self.name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema::new(self.name.clone(), columns))
    }
}

impl From<&Schema> for SchemaSpec {
    fn from(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            columns: schema.columns().iter().map(ColumnSpec::from).collect(),
        }
    }
}

/// A validated set of schemas keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaCatalog {
    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_yaml::from_str(input)?;
        Self::try_from(spec)
    }

    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Result<Self, CatalogError> {
        let mut by_name = BTreeMap::new();
        for schema in schemas {
            if schema.name().trim().is_empty() {
                return Err(CatalogError::EmptySchemaName);
            }
            if by_name.contains_key(schema.name()) {
                return Err(CatalogError::DuplicateSchema {
                    name: schema.name().to_string(),
                });
            }
            by_name.insert(schema.name().to_string(), schema);
        }
        debug!("Loaded catalog with {} schema(s)", by_name.len());
        Ok(Self { schemas: by_name })
    }

    pub fn to_yaml_string(&self) -> Result<String, CatalogError> {
        let spec = CatalogSpec {
            schemas: self.schemas().map(SchemaSpec::from).collect(),
        };
        Ok(serde_yaml::to_string(&spec)?)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn find_matching_schemas(&self, headers: &BTreeSet<String>) -> Result<BTreeSet<Schema>> {
        ranking::find_matching_schemas(self.schemas(), headers)
    }

    pub fn find_best_matching_schemas(
        &self,
        headers: &BTreeSet<String>,
    ) -> Result<Vec<RankedSchema>> {
        ranking::find_best_matching_schemas(self.schemas(), headers)
    }

    pub fn find_best_matching_schema(
        &self,
        headers: &BTreeSet<String>,
    ) -> Result<Option<RankedSchema>> {
        ranking::find_best_matching_schema(self.schemas(), headers)
    }
}

impl TryFrom<CatalogSpec> for SchemaCatalog {
    type Error = CatalogError;

    fn try_from(spec: CatalogSpec) -> Result<Self, Self::Error> {
        let schemas = spec
            .schemas
            .iter()
            .map(SchemaSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_schemas(schemas)
    }
}
