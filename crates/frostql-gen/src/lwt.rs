use crate::ir::{
    BindingKind, BufferKind, MethodDefinition, ParamSpec, Relation, StateRole, Transition,
    TypeDefinition, TypeId,
};
use convert_case::{Case, Casing};
use frostql_schema::prelude::*;

const CONDITION_RELATIONS: [Relation; 6] = [
    Relation::Eq,
    Relation::Gt,
    Relation::Gte,
    Relation::Lt,
    Relation::Lte,
    Relation::NotEq,
];

/// Generate the compare-and-set condition surface: one `If_<Column>`
/// type per Normal/Static column, six relation methods each, all
/// appending to the only-if buffer and looping back to the invoking
/// state. IF conditions are optional and repeatable; they never advance
/// a chain position.
///
/// Compare-and-set semantics are undefined for counters, so the whole
/// surface is skipped when the entity has any counter column.
pub fn condition_types(
    schema: &Schema,
    super_type: &TypeId,
    invoking_state: &TypeId,
) -> Vec<TypeDefinition> {
    if schema.has_counter {
        return Vec::new();
    }

    schema
        .condition_columns()
        .map(|column| condition_type(column, super_type, invoking_state))
        .collect()
}

fn condition_type(
    column: &ColumnSignature,
    super_type: &TypeId,
    invoking_state: &TypeId,
) -> TypeDefinition {
    let id = TypeId::new(format!("If_{}", column.field_name.to_case(Case::Pascal)));

    let methods = CONDITION_RELATIONS
        .iter()
        .map(|&relation| MethodDefinition {
            name: relation.suffix().to_string(),
            params: vec![ParamSpec::new(
                column.sanitized_name(),
                &column.wire_name,
                column.value_type.clone(),
            )],
            fragment: format!("{} {} ?", column.quoted_wire_name, relation.symbol()),
            buffer: BufferKind::If,
            binding: BindingKind::Encoded,
            transition: Transition::Loop,
            returns: invoking_state.clone(),
        })
        .collect();

    TypeDefinition {
        id,
        role: StateRole::ConditionState,
        super_type: super_type.clone(),
        return_type: invoking_state.clone(),
        bound_column: Some(column.clone()),
        methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: Vec<ColumnSignature>) -> Schema {
        let mut all = vec![ColumnSignature::new("id", "i64", ColumnRole::Partition, 0)];
        all.extend(columns);

        Schema::new("user", all, vec![]).unwrap()
    }

    fn terminal() -> TypeId {
        TypeId::new("UserWhereEnd")
    }

    fn base() -> TypeId {
        TypeId::new("UserDslBase")
    }

    #[test]
    fn one_condition_type_per_normal_or_static_column() {
        let schema = schema(vec![
            ColumnSignature::new("name", "String", ColumnRole::Normal, 0),
            ColumnSignature::new("flags", "i64", ColumnRole::Static, 0),
        ]);

        let types = condition_types(&schema, &base(), &terminal());
        let ids: Vec<&str> = types.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["If_Name", "If_Flags"]);
    }

    #[test]
    fn six_methods_all_looping_into_the_if_buffer() {
        let schema = schema(vec![ColumnSignature::new(
            "name",
            "String",
            ColumnRole::Normal,
            0,
        )]);

        let types = condition_types(&schema, &base(), &terminal());
        assert_eq!(types[0].methods.len(), 6);

        for method in &types[0].methods {
            assert_eq!(method.buffer, BufferKind::If);
            assert_eq!(method.transition, Transition::Loop);
            assert_eq!(method.returns, terminal());
        }

        let not_eq = types[0].method("not_eq").unwrap();
        assert_eq!(not_eq.fragment, "\"name\" != ?");
    }

    #[test]
    fn any_counter_column_disables_the_whole_surface() {
        let schema = schema(vec![
            ColumnSignature::new("name", "String", ColumnRole::Normal, 0),
            ColumnSignature::new("likes", "i64", ColumnRole::Counter, 0),
            ColumnSignature::new("bio", "String", ColumnRole::Normal, 1),
            ColumnSignature::new("age", "i64", ColumnRole::Normal, 2),
        ]);

        assert!(condition_types(&schema, &base(), &terminal()).is_empty());
    }
}
