use crate::prelude::*;
use convert_case::{Case, Casing};

///
/// ColumnSignature
///
/// One mapped column. `order` is the declared position within the
/// column's role group and must match the table's physical key order.
///

#[derive(Clone, Debug, Serialize)]
pub struct ColumnSignature {
    pub field_name: String,
    pub wire_name: String,
    pub quoted_wire_name: String,
    pub value_type: TypeRef,
    pub role: ColumnRole,
    pub order: u32,
}

impl ColumnSignature {
    pub fn new(
        field_name: impl Into<String>,
        value_type: impl Into<TypeRef>,
        role: ColumnRole,
        order: u32,
    ) -> Self {
        let field_name = field_name.into();
        let wire_name = field_name.to_case(Case::Snake);
        let quoted_wire_name = format!("\"{wire_name}\"");

        Self {
            field_name,
            wire_name,
            quoted_wire_name,
            value_type: value_type.into(),
            role,
            order,
        }
    }

    /// Override the wire name when the mapped name differs from the field.
    #[must_use]
    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self.quoted_wire_name = format!("\"{}\"", self.wire_name);

        self
    }

    /// Canonical identifier used for collision checks and generated names.
    #[must_use]
    pub fn sanitized_name(&self) -> String {
        self.field_name.to_case(Case::Snake)
    }
}

///
/// ColumnList
///

#[derive(Clone, Debug, Default, Serialize, derive_more::Deref, derive_more::IntoIterator)]
pub struct ColumnList {
    #[into_iterator(ref)]
    pub columns: Vec<ColumnSignature>,
}

impl ColumnList {
    #[must_use]
    pub fn new(columns: Vec<ColumnSignature>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn get(&self, field_name: &str) -> Option<&ColumnSignature> {
        self.columns.iter().find(|c| c.field_name == field_name)
    }

    /// Columns sorted by their declared key order.
    #[must_use]
    pub fn sorted_by_order(&self) -> Vec<ColumnSignature> {
        let mut sorted = self.columns.clone();
        sorted.sort_by_key(|c| c.order);

        sorted
    }
}

impl From<Vec<ColumnSignature>> for ColumnList {
    fn from(columns: Vec<ColumnSignature>) -> Self {
        Self::new(columns)
    }
}
