use crate::ir::{
    BindingKind, BufferKind, MethodDefinition, ParamSpec, Relation, StateChain, StateDescriptor,
    StateRole, Transition, TypeId,
};
use frostql_schema::prelude::*;

/// Immutable context a chain's relation synthesis shares: the token
/// function's left-hand side spans every partition-key wire name, and
/// token methods jump straight past the remaining partition states.
pub struct ChainContext {
    pub token_lhs: String,
    pub token_target: TypeId,
    pub first_partition: TypeId,
}

impl ChainContext {
    #[must_use]
    pub fn new(chain: &StateChain, partition_keys: &[ColumnSignature]) -> Self {
        let wire_names: Vec<&str> = partition_keys.iter().map(|c| c.wire_name.as_str()).collect();

        Self {
            token_lhs: format!("token({})", wire_names.join(",")),
            token_target: chain.post_partition().type_id.clone(),
            first_partition: chain.states[0].type_id.clone(),
        }
    }
}

/// Emit the predicate method set for one chain state.
///
/// Transition policy, fixed here once per call site:
/// - key equality and IN advance (`Branch`), since key order is
///   mandatory and not repeatable;
/// - clustering range filters repeat at the same depth (`Loop`);
/// - token methods address the whole partition key and `Branch`
///   directly past the remaining partition states.
pub fn relation_methods(desc: &StateDescriptor, ctx: &ChainContext) -> Vec<MethodDefinition> {
    let Some(column) = desc.bound_column.as_ref() else {
        return Vec::new();
    };

    let mut methods = Vec::new();

    match desc.role {
        StateRole::PartitionKeyState => {
            methods.push(single_relation(
                column,
                Relation::Eq,
                Transition::Branch,
                desc.return_type.clone(),
            ));
            methods.push(in_relation(column, desc.return_type.clone()));

            if desc.type_id == ctx.first_partition {
                methods.extend(token_methods(ctx));
            }
        }
        StateRole::ClusteringKeyState => {
            methods.push(single_relation(
                column,
                Relation::Eq,
                Transition::Branch,
                desc.return_type.clone(),
            ));
            methods.push(in_relation(column, desc.return_type.clone()));

            for relation in [Relation::Gt, Relation::Gte, Relation::Lt, Relation::Lte] {
                methods.push(single_relation(
                    column,
                    relation,
                    Transition::Loop,
                    desc.type_id.clone(),
                ));
            }
        }
        _ => {}
    }

    methods
}

/// One typed parameter, one predicate fragment, fixed relation symbol.
pub fn single_relation(
    column: &ColumnSignature,
    relation: Relation,
    transition: Transition,
    returns: TypeId,
) -> MethodDefinition {
    let name = column.sanitized_name();

    MethodDefinition {
        name: format!("{name}_{}", relation.suffix()),
        params: vec![ParamSpec::new(
            name,
            &column.wire_name,
            column.value_type.clone(),
        )],
        fragment: format!("{} {} ?", column.quoted_wire_name, relation.symbol()),
        buffer: BufferKind::Where,
        binding: BindingKind::Encoded,
        transition,
        returns,
    }
}

/// IN predicate: one list parameter, whole list bound raw, per-element
/// encoded. Empty lists fail at call time, not generation time.
fn in_relation(column: &ColumnSignature, returns: TypeId) -> MethodDefinition {
    let name = column.sanitized_name();

    MethodDefinition {
        name: format!("{name}_{}", Relation::In.suffix()),
        params: vec![ParamSpec::new(
            name,
            &column.wire_name,
            TypeRef::new(format!("Vec<{}>", column.value_type.path())),
        )],
        fragment: format!("{} IN ?", column.quoted_wire_name),
        buffer: BufferKind::Where,
        binding: BindingKind::InList,
        transition: Transition::Branch,
        returns,
    }
}

// Token ordering keys are opaque and pass through unencoded.
fn token_methods(ctx: &ChainContext) -> Vec<MethodDefinition> {
    let mut methods = Vec::new();

    for relation in [Relation::Gt, Relation::Gte, Relation::Lt, Relation::Lte] {
        methods.push(MethodDefinition {
            name: format!("token_{}", relation.suffix()),
            params: vec![ParamSpec::new("token", "", TypeRef::new("i64"))],
            fragment: format!("{} {} ?", ctx.token_lhs, relation.symbol()),
            buffer: BufferKind::Where,
            binding: BindingKind::Passthrough,
            transition: Transition::Branch,
            returns: ctx.token_target.clone(),
        });
    }

    // Double-bounded scan: both ends of the ring range in one call.
    methods.push(MethodDefinition {
        name: "token_range".to_string(),
        params: vec![
            ParamSpec::new("token_gt", "", TypeRef::new("i64")),
            ParamSpec::new("token_lt", "", TypeRef::new("i64")),
        ],
        fragment: format!("{lhs} > ? AND {lhs} < ?", lhs = ctx.token_lhs),
        buffer: BufferKind::Where,
        binding: BindingKind::Passthrough,
        transition: Transition::Branch,
        returns: ctx.token_target.clone(),
    });

    methods
}
