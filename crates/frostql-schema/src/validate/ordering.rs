use crate::{node::ColumnList, types::ColumnRole, validate::SchemaError};
use std::collections::BTreeMap;

/// Check that a key group's `order` values form a contiguous 0-based
/// sequence with no duplicates.
pub fn validate_role_ordering(columns: &ColumnList, role: ColumnRole) -> Result<(), SchemaError> {
    let mut by_order: BTreeMap<u32, &str> = BTreeMap::new();

    for column in columns {
        if by_order
            .insert(column.order, column.field_name.as_str())
            .is_some()
        {
            return Err(SchemaError::DuplicateOrder {
                role,
                order: column.order,
                column: column.field_name.clone(),
            });
        }
    }

    for (expected, actual) in (0u32..).zip(by_order.keys().copied()) {
        if expected != actual {
            return Err(SchemaError::NonContiguousOrder {
                role,
                missing: expected,
            });
        }
    }

    Ok(())
}
