use crate::ir::{
    BindingKind, BufferKind, MethodDefinition, ParamSpec, Relation, StateRole, Transition,
    TypeDefinition, TypeId,
};
use frostql_schema::prelude::*;

const LOWER_BOUNDS: [Relation; 2] = [Relation::Gt, Relation::Gte];
const UPPER_BOUNDS: [Relation; 2] = [Relation::Lt, Relation::Lte];

/// Generate one multi-column restriction type per contiguous clustering
/// prefix of length >= 2, named by joining the prefix's field names
/// with `_`. Each type carries 16 methods: 4 tuple relations, 4
/// symmetric double relations, and 8 asymmetric double relations (one
/// bound over the full tuple, the other over the one-shorter prefix,
/// in both orderings).
pub fn slice_types(
    clustering_columns: &ColumnList,
    super_type: &TypeId,
    terminal: &TypeId,
) -> Vec<TypeDefinition> {
    let sorted = clustering_columns.sorted_by_order();

    (2..=sorted.len())
        .map(|len| slice_type(&sorted[..len], super_type, terminal))
        .collect()
}

fn slice_type(columns: &[ColumnSignature], super_type: &TypeId, terminal: &TypeId) -> TypeDefinition {
    let names: Vec<String> = columns.iter().map(ColumnSignature::sanitized_name).collect();
    let id = TypeId::new(names.join("_"));

    let mut methods = Vec::with_capacity(16);

    // 4 tuple relations over the full prefix.
    for relation in [Relation::Gt, Relation::Gte, Relation::Lt, Relation::Lte] {
        methods.push(MethodDefinition {
            name: relation.suffix().to_string(),
            params: side_params(columns, None),
            fragment: format!(
                "{} {} {}",
                tuple_lhs(columns),
                relation.symbol(),
                markers(columns.len())
            ),
            buffer: BufferKind::Where,
            binding: BindingKind::Encoded,
            transition: Transition::Branch,
            returns: terminal.clone(),
        });
    }

    // 4 symmetric double relations: both bounds over the full prefix.
    for lower in LOWER_BOUNDS {
        for upper in UPPER_BOUNDS {
            methods.push(double_relation(
                columns, lower, columns, upper, terminal, false,
            ));
        }
    }

    // 8 asymmetric double relations: one bound over the full prefix,
    // the other over the one-shorter prefix, in both orderings.
    let short = &columns[..columns.len() - 1];
    for lower in LOWER_BOUNDS {
        for upper in UPPER_BOUNDS {
            methods.push(double_relation(columns, lower, short, upper, terminal, false));
            methods.push(double_relation(short, lower, columns, upper, terminal, true));
        }
    }

    TypeDefinition {
        id: id.clone(),
        role: StateRole::SliceState,
        super_type: super_type.clone(),
        return_type: terminal.clone(),
        bound_column: None,
        methods,
    }
}

/// A two-sided restriction: `lhs_cols <lower> markers AND rhs_cols
/// <upper> markers`. Parameters carry the relation-side suffix so both
/// bounds may reference the same column without colliding.
fn double_relation(
    lower_cols: &[ColumnSignature],
    lower: Relation,
    upper_cols: &[ColumnSignature],
    upper: Relation,
    terminal: &TypeId,
    short_bound_first: bool,
) -> MethodDefinition {
    let symmetric = lower_cols.len() == upper_cols.len();

    let name = if symmetric {
        format!("{}_and_{}", lower.suffix(), upper.suffix())
    } else if short_bound_first {
        format!("prefix_{}_and_{}", lower.suffix(), upper.suffix())
    } else {
        format!("{}_and_prefix_{}", lower.suffix(), upper.suffix())
    };

    let mut params = side_params(lower_cols, Some(lower));
    params.extend(side_params(upper_cols, Some(upper)));

    MethodDefinition {
        name,
        params,
        fragment: format!(
            "{} {} {} AND {} {} {}",
            tuple_lhs(lower_cols),
            lower.symbol(),
            markers(lower_cols.len()),
            tuple_lhs(upper_cols),
            upper.symbol(),
            markers(upper_cols.len()),
        ),
        buffer: BufferKind::Where,
        binding: BindingKind::Encoded,
        transition: Transition::Branch,
        returns: terminal.clone(),
    }
}

fn side_params(columns: &[ColumnSignature], side: Option<Relation>) -> Vec<ParamSpec> {
    columns
        .iter()
        .map(|column| {
            let base = column.sanitized_name();
            let name = match side {
                Some(relation) => format!("{base}_{}", relation.suffix()),
                None => base,
            };

            ParamSpec::new(name, &column.wire_name, column.value_type.clone())
        })
        .collect()
}

fn tuple_lhs(columns: &[ColumnSignature]) -> String {
    let quoted: Vec<&str> = columns
        .iter()
        .map(|c| c.quoted_wire_name.as_str())
        .collect();

    format!("({})", quoted.join(","))
}

fn markers(count: usize) -> String {
    format!("({})", vec!["?"; count].join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clustering(names: &[&str]) -> ColumnList {
        ColumnList::new(
            names
                .iter()
                .enumerate()
                .map(|(order, name)| {
                    ColumnSignature::new(*name, "i64", ColumnRole::Clustering, order as u32)
                })
                .collect(),
        )
    }

    fn terminal() -> TypeId {
        TypeId::new("UserWhereEnd")
    }

    fn base() -> TypeId {
        TypeId::new("UserDslBase")
    }

    #[test]
    fn one_type_per_prefix_of_length_at_least_two() {
        let types = slice_types(&clustering(&["a", "b", "c"]), &base(), &terminal());

        let ids: Vec<&str> = types.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a_b", "a_b_c"]);
    }

    #[test]
    fn zero_and_single_clustering_columns_generate_nothing() {
        assert!(slice_types(&clustering(&[]), &base(), &terminal()).is_empty());
        assert!(slice_types(&clustering(&["a"]), &base(), &terminal()).is_empty());
    }

    #[test]
    fn each_slice_type_has_sixteen_methods() {
        let types = slice_types(&clustering(&["a", "b", "c"]), &base(), &terminal());

        for ty in &types {
            assert_eq!(ty.methods.len(), 16, "type {}", ty.id);
        }
    }

    #[test]
    fn tuple_relation_covers_the_full_prefix() {
        let types = slice_types(&clustering(&["a", "b"]), &base(), &terminal());
        let gt = types[0].method("gt").unwrap();

        assert_eq!(gt.fragment, "(\"a\",\"b\") > (?,?)");
        assert_eq!(gt.params.len(), 2);
        assert_eq!(gt.transition, Transition::Branch);
    }

    #[test]
    fn symmetric_double_suffixes_params_per_side() {
        let types = slice_types(&clustering(&["a", "b"]), &base(), &terminal());
        let method = types[0].method("gt_and_lt").unwrap();

        let params: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["a_gt", "b_gt", "a_lt", "b_lt"]);
        assert_eq!(
            method.fragment,
            "(\"a\",\"b\") > (?,?) AND (\"a\",\"b\") < (?,?)"
        );
    }

    #[test]
    fn asymmetric_doubles_shorten_one_side_in_both_orderings() {
        let types = slice_types(&clustering(&["a", "b"]), &base(), &terminal());

        let long_first = types[0].method("gt_and_prefix_lt").unwrap();
        assert_eq!(
            long_first.fragment,
            "(\"a\",\"b\") > (?,?) AND (\"a\") < (?)"
        );
        assert_eq!(long_first.params.len(), 3);

        let short_first = types[0].method("prefix_gt_and_lt").unwrap();
        assert_eq!(
            short_first.fragment,
            "(\"a\") > (?) AND (\"a\",\"b\") < (?,?)"
        );
        assert_eq!(short_first.params.len(), 3);
    }

    #[test]
    fn method_names_within_a_slice_type_are_unique() {
        let types = slice_types(&clustering(&["a", "b", "c"]), &base(), &terminal());

        for ty in &types {
            let mut names: Vec<&str> = ty.methods.iter().map(|m| m.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), 16);
        }
    }
}
