use crate::ir::{
    BindingKind, BufferKind, MethodDefinition, ParamSpec, Transition, TypeDefinition, TypeId,
};
use frostql_schema::prelude::*;

/// Augment a chain state with the JSON-encoded counterpart of its
/// equality predicate: the right-hand side becomes a `fromJson(?)`
/// function wrapper, the JSON text passes through verbatim as both the
/// raw and the encoded value, and the transition is always a branch.
pub fn augment_state(def: &mut TypeDefinition) {
    let Some(column) = def.bound_column.clone() else {
        return;
    };

    def.methods.push(MethodDefinition {
        name: format!("{}_eq_from_json", column.sanitized_name()),
        params: vec![json_param("json", &column)],
        fragment: format!("{} = fromJson(?)", column.quoted_wire_name),
        buffer: BufferKind::Where,
        binding: BindingKind::Passthrough,
        transition: Transition::Branch,
        returns: def.return_type.clone(),
    });
}

/// Augment the terminal state with the update-context and index-driven
/// JSON families: per-column `fromJson` assignments, and containment
/// predicates for indexed collection/map columns.
pub fn augment_terminal(schema: &Schema, terminal: &mut TypeDefinition) {
    for column in schema.condition_columns() {
        terminal.methods.push(MethodDefinition {
            name: format!("{}_set_from_json", column.sanitized_name()),
            params: vec![json_param("json", column)],
            fragment: format!("{} = fromJson(?)", column.quoted_wire_name),
            buffer: BufferKind::Set,
            // Assignments are repeatable; they never advance the chain.
            binding: BindingKind::Passthrough,
            transition: Transition::Loop,
            returns: terminal.id.clone(),
        });
    }

    for index in &schema.indexes {
        terminal
            .methods
            .extend(contains_methods(index, &terminal.id));
    }
}

fn contains_methods(index: &IndexSignature, terminal: &TypeId) -> Vec<MethodDefinition> {
    let column = &index.column;

    let collection = |name_suffix: &str, fragment: String, params: Vec<ParamSpec>| {
        MethodDefinition {
            name: format!("{}_{name_suffix}", column.sanitized_name()),
            params,
            fragment,
            buffer: BufferKind::Where,
            binding: BindingKind::Passthrough,
            transition: Transition::Branch,
            returns: terminal.clone(),
        }
    };

    let contains = || {
        collection(
            "contains_from_json",
            format!("{} CONTAINS fromJson(?)", column.quoted_wire_name),
            vec![json_param("json", column)],
        )
    };
    let contains_key = || {
        collection(
            "contains_key_from_json",
            format!("{} CONTAINS KEY fromJson(?)", column.quoted_wire_name),
            vec![json_param("json", column)],
        )
    };
    let contains_value = || {
        collection(
            "contains_value_from_json",
            format!("{} CONTAINS fromJson(?)", column.quoted_wire_name),
            vec![json_param("json", column)],
        )
    };
    let contains_entry = || {
        collection(
            "contains_entry_from_json",
            format!(
                "{}[fromJson(?)] = fromJson(?)",
                column.quoted_wire_name
            ),
            vec![json_param("key_json", column), json_param("value_json", column)],
        )
    };

    match index.index_kind {
        IndexKind::Collection => vec![contains()],
        IndexKind::MapKey => vec![contains_key()],
        IndexKind::MapValue => vec![contains_value()],
        IndexKind::MapEntry => vec![contains_entry()],
        IndexKind::Full => vec![contains(), contains_key(), contains_value(), contains_entry()],
    }
}

fn json_param(name: &str, column: &ColumnSignature) -> ParamSpec {
    ParamSpec::new(name, &column.wire_name, TypeRef::new("String"))
}
