
use crate::ir::{BindingKind, BufferKind, MethodDefinition};
use frostql_core::{DslState, Error, PassthroughEncoder, Value};
use frostql_schema::prelude::*;

/// Build a schema from shorthand: partition keys, clustering columns,
/// then any extra value columns.
pub(crate) fn schema(
    entity: &str,
    partition: &[&str],
    clustering: &[&str],
    values: &[(&str, ColumnRole)],
) -> Schema {
    let mut columns = Vec::new();

    for (order, name) in partition.iter().enumerate() {
        columns.push(ColumnSignature::new(
            *name,
            "i64",
            ColumnRole::Partition,
            order as u32,
        ));
    }
    for (order, name) in clustering.iter().enumerate() {
        columns.push(ColumnSignature::new(
            *name,
            "i64",
            ColumnRole::Clustering,
            order as u32,
        ));
    }
    for (order, (name, role)) in values.iter().enumerate() {
        columns.push(ColumnSignature::new(*name, "i64", *role, order as u32));
    }

    Schema::new(entity, columns, vec![]).unwrap()
}

/// Execute one IR method against a live `DslState`, the way rendered
/// code would: append the fragment to the method's buffer, then bind
/// one argument per parameter under the method's binding policy.
pub(crate) fn apply(
    method: &MethodDefinition,
    state: &mut DslState,
    args: Vec<Value>,
) -> Result<(), Error> {
    match method.binding {
        BindingKind::InList => {
            state.where_in(
                &method.params[0].column,
                method.fragment.clone(),
                args,
                &PassthroughEncoder,
            )?;
        }
        BindingKind::Encoded => {
            append(method, state);
            for (param, arg) in method.params.iter().zip(args) {
                state.bind_encoded(&param.column, arg, &PassthroughEncoder)?;
            }
        }
        BindingKind::Passthrough => {
            append(method, state);
            for arg in args {
                state.bind_passthrough(arg);
            }
        }
    }

    Ok(())
}

fn append(method: &MethodDefinition, state: &mut DslState) {
    match method.buffer {
        BufferKind::Where => state.append_where(method.fragment.clone()),
        BufferKind::If => state.append_if(method.fragment.clone()),
        BufferKind::Set => state.append_set(method.fragment.clone()),
    }
}
