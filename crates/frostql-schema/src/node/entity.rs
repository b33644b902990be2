use crate::{prelude::*, validate::validate_schema};
use convert_case::{Case, Casing};

///
/// Schema
///
/// The full descriptor for one mapped entity, as handed over by the
/// metadata layer. Construction validates the key-order invariants and
/// name uniqueness; a `Schema` value is therefore always well formed.
///

#[derive(Clone, Debug, Serialize)]
pub struct Schema {
    pub entity_name: String,
    pub partition_keys: ColumnList,
    pub clustering_columns: ColumnList,
    pub value_columns: ColumnList,
    pub indexes: Vec<IndexSignature>,
    pub has_counter: bool,
}

impl Schema {
    pub fn new(
        entity_name: impl Into<String>,
        columns: Vec<ColumnSignature>,
        indexes: Vec<IndexSignature>,
    ) -> Result<Self, SchemaError> {
        let entity_name = entity_name.into();

        let mut partition_keys = Vec::new();
        let mut clustering_columns = Vec::new();
        let mut value_columns = Vec::new();
        let mut has_counter = false;

        for column in columns {
            has_counter |= column.role.is_counter();

            match column.role {
                ColumnRole::Partition => partition_keys.push(column),
                ColumnRole::Clustering => clustering_columns.push(column),
                _ => value_columns.push(column),
            }
        }

        let schema = Self {
            entity_name,
            partition_keys: ColumnList::new(partition_keys),
            clustering_columns: ColumnList::new(clustering_columns),
            value_columns: ColumnList::new(value_columns),
            indexes,
            has_counter,
        };
        validate_schema(&schema)?;

        Ok(schema)
    }

    /// Base identifier for the entity's generated type names.
    #[must_use]
    pub fn type_base(&self) -> String {
        self.entity_name.to_case(Case::Pascal)
    }

    /// Columns eligible for compare-and-set conditions.
    pub fn condition_columns(&self) -> impl Iterator<Item = &ColumnSignature> {
        self.value_columns
            .iter()
            .filter(|c| c.role.supports_conditions())
    }

    #[must_use]
    pub fn has_static_columns(&self) -> bool {
        self.value_columns.iter().any(|c| c.role.is_static())
    }

    /// Every column of the schema, keys first.
    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnSignature> {
        self.partition_keys
            .iter()
            .chain(self.clustering_columns.iter())
            .chain(self.value_columns.iter())
    }
}
