use crate::{
    GenerateError,
    ir::{StateChain, StateDescriptor, StateRole, TypeId},
};
use convert_case::{Case, Casing};
use frostql_schema::prelude::*;

/// Plan the ordered state chain for one where-clause variant.
///
/// One state per partition key, one per clustering column (skipped
/// entirely when `wants_clustering_filters` is false, the static-column
/// variant), and exactly one terminal state. Each non-terminal state's
/// return type is the next state in the chain; the terminal self-loops.
pub fn plan(
    prefix: &str,
    super_type: &TypeId,
    partition_keys: &ColumnList,
    clustering_columns: &ColumnList,
    wants_clustering_filters: bool,
) -> Result<StateChain, GenerateError> {
    if partition_keys.is_empty() {
        return Err(SchemaError::NoPartitionKey {
            entity: prefix.to_string(),
        }
        .into());
    }

    let partition_keys = partition_keys.sorted_by_order();
    let clustering_columns = if wants_clustering_filters {
        clustering_columns.sorted_by_order()
    } else {
        Vec::new()
    };

    let terminal_id = TypeId::new(format!("{prefix}End"));
    let mut ids: Vec<TypeId> = partition_keys
        .iter()
        .chain(clustering_columns.iter())
        .map(|c| state_id(prefix, c))
        .collect();
    ids.push(terminal_id);

    let mut states = Vec::with_capacity(ids.len());

    for (position, column) in partition_keys.iter().enumerate() {
        states.push(StateDescriptor {
            type_id: ids[position].clone(),
            return_type: ids[position + 1].clone(),
            super_type: super_type.clone(),
            role: StateRole::PartitionKeyState,
            bound_column: Some(column.clone()),
        });
    }

    let offset = partition_keys.len();
    for (position, column) in clustering_columns.iter().enumerate() {
        states.push(StateDescriptor {
            type_id: ids[offset + position].clone(),
            return_type: ids[offset + position + 1].clone(),
            super_type: super_type.clone(),
            role: StateRole::ClusteringKeyState,
            bound_column: Some(column.clone()),
        });
    }

    let terminal_id = ids.pop().unwrap_or_else(|| unreachable!());
    states.push(StateDescriptor {
        type_id: terminal_id.clone(),
        return_type: terminal_id,
        super_type: super_type.clone(),
        role: StateRole::TerminalState,
        bound_column: None,
    });

    Ok(StateChain {
        states,
        partition_count: partition_keys.len(),
        clustering_count: clustering_columns.len(),
    })
}

fn state_id(prefix: &str, column: &ColumnSignature) -> TypeId {
    TypeId::new(format!(
        "{prefix}{}",
        column.field_name.to_case(Case::Pascal)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TypeId {
        TypeId::new("UserDslBase")
    }

    fn pk(name: &str, order: u32) -> ColumnSignature {
        ColumnSignature::new(name, "i64", ColumnRole::Partition, order)
    }

    fn cc(name: &str, order: u32) -> ColumnSignature {
        ColumnSignature::new(name, "i64", ColumnRole::Clustering, order)
    }

    #[test]
    fn chain_length_is_keys_plus_clustering_plus_terminal() {
        let chain = plan(
            "UserWhere",
            &base(),
            &ColumnList::new(vec![pk("id", 0)]),
            &ColumnList::new(vec![cc("a", 0), cc("b", 1)]),
            true,
        )
        .unwrap();

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.partition_count, 1);
        assert_eq!(chain.clustering_count, 2);
    }

    #[test]
    fn partition_states_precede_clustering_states_precede_terminal() {
        let chain = plan(
            "UserWhere",
            &base(),
            &ColumnList::new(vec![pk("region", 0), pk("bucket", 1)]),
            &ColumnList::new(vec![cc("a", 0)]),
            true,
        )
        .unwrap();

        let roles: Vec<StateRole> = chain.states.iter().map(|s| s.role).collect();
        assert_eq!(
            roles,
            vec![
                StateRole::PartitionKeyState,
                StateRole::PartitionKeyState,
                StateRole::ClusteringKeyState,
                StateRole::TerminalState,
            ]
        );
    }

    #[test]
    fn return_types_thread_to_the_next_state() {
        let chain = plan(
            "UserWhere",
            &base(),
            &ColumnList::new(vec![pk("id", 0)]),
            &ColumnList::new(vec![cc("a", 0), cc("b", 1)]),
            true,
        )
        .unwrap();

        for window in chain.states.windows(2) {
            assert_eq!(window[0].return_type, window[1].type_id);
        }
        assert_eq!(chain.terminal().return_type, chain.terminal().type_id);
    }

    #[test]
    fn key_order_wins_over_declaration_order() {
        let chain = plan(
            "UserWhere",
            &base(),
            &ColumnList::new(vec![pk("second", 1), pk("first", 0)]),
            &ColumnList::default(),
            true,
        )
        .unwrap();

        assert_eq!(chain.states[0].type_id.as_str(), "UserWhereFirst");
        assert_eq!(chain.states[1].type_id.as_str(), "UserWhereSecond");
    }

    #[test]
    fn static_variant_skips_clustering_columns() {
        let chain = plan(
            "UserWhereStatic",
            &base(),
            &ColumnList::new(vec![pk("id", 0)]),
            &ColumnList::new(vec![cc("a", 0), cc("b", 1)]),
            false,
        )
        .unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.states[0].return_type.as_str(),
            chain.terminal().type_id.as_str()
        );
    }

    #[test]
    fn empty_partition_key_is_fatal() {
        let result = plan(
            "UserWhere",
            &base(),
            &ColumnList::default(),
            &ColumnList::default(),
            true,
        );

        assert!(matches!(
            result,
            Err(GenerateError::Schema(SchemaError::NoPartitionKey { .. }))
        ));
    }
}
