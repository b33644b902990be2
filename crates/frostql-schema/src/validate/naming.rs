use crate::{MAX_COLUMN_NAME_LEN, MAX_ENTITY_NAME_LEN, node::Schema, validate::SchemaError};
use std::collections::BTreeMap;

/// Reject over-long identifiers before they reach generated names.
pub fn validate_name_lengths(schema: &Schema) -> Result<(), SchemaError> {
    if schema.entity_name.len() > MAX_ENTITY_NAME_LEN {
        return Err(SchemaError::NameTooLong {
            name: schema.entity_name.clone(),
            max: MAX_ENTITY_NAME_LEN,
        });
    }

    for column in schema.all_columns() {
        if column.field_name.len() > MAX_COLUMN_NAME_LEN {
            return Err(SchemaError::NameTooLong {
                name: column.field_name.clone(),
                max: MAX_COLUMN_NAME_LEN,
            });
        }
    }

    Ok(())
}

/// Reject schemas whose columns collide after name sanitization.
/// Two distinct field names can map to the same sanitized identifier
/// (`myField` and `my_field` both become `my_field`), which would later
/// produce colliding generated types.
pub fn validate_column_naming(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();

    for column in schema.all_columns() {
        let name = column.sanitized_name();

        if let Some(first) = seen.insert(name.clone(), column.field_name.clone()) {
            return Err(SchemaError::DuplicateColumnName {
                name,
                first,
                second: column.field_name.clone(),
            });
        }
    }

    Ok(())
}
