//! Schema validation: staged, deterministic passes run once at
//! `Schema` construction. Everything here is fatal — a schema that
//! fails validation never reaches the generator.

pub mod naming;
pub mod ordering;

use crate::{node::Schema, types::ColumnRole};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Schema-construction failures. All variants abort generation for the
/// entity; there is no partial output.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("entity '{entity}' declares no partition key")]
    NoPartitionKey { entity: String },

    #[error("duplicate {role} order {order} on column '{column}'")]
    DuplicateOrder {
        role: ColumnRole,
        order: u32,
        column: String,
    },

    #[error("{role} orders are not a contiguous 0-based sequence: missing {missing}")]
    NonContiguousOrder { role: ColumnRole, missing: u32 },

    #[error("columns '{first}' and '{second}' collide on sanitized name '{name}'")]
    DuplicateColumnName {
        name: String,
        first: String,
        second: String,
    },

    #[error("identifier '{name}' exceeds {max} characters")]
    NameTooLong { name: String, max: usize },
}

/// Run full schema validation in a staged, deterministic order.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    // Phase 1: key-group structural invariants.
    if schema.partition_keys.is_empty() {
        return Err(SchemaError::NoPartitionKey {
            entity: schema.entity_name.clone(),
        });
    }
    ordering::validate_role_ordering(&schema.partition_keys, ColumnRole::Partition)?;
    ordering::validate_role_ordering(&schema.clustering_columns, ColumnRole::Clustering)?;

    // Phase 2: schema-wide naming rules.
    naming::validate_name_lengths(schema)?;
    naming::validate_column_naming(schema)?;

    Ok(())
}
