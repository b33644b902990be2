pub mod ir;
pub mod json;
pub mod lwt;
pub mod plan;
pub mod relation;
pub mod render;
pub mod slice;

#[cfg(test)]
mod tests;

use crate::ir::{TypeDefinition, TypeId};
use frostql_schema::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        GenerateError, generate,
        ir::{
            BindingKind, BufferKind, MethodDefinition, ParamSpec, Relation, StateChain,
            StateDescriptor, StateRole, Transition, TypeDefinition, TypeId,
        },
        render::{Render, RenderError, RustRenderer},
    };
}

///
/// GenerateError
///
/// Generation-time failures. Both variants abort the entity's
/// generation; there is no partial output and no retry.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("generated type name '{name}' collides; field names alias after sanitization")]
    TypeNameCollision { name: String },
}

/// Compile one entity schema into its typestate builder surface.
///
/// A pure, single-threaded pass: plan the state chain, synthesize each
/// state's relation methods, attach the slice, condition, and JSON
/// surfaces, then verify the emitted type names are unique. The result
/// is handed to a renderer; nothing here is mutated afterwards.
pub fn generate(schema: &Schema) -> Result<Vec<TypeDefinition>, GenerateError> {
    let base = schema.type_base();
    let super_type = TypeId::new(format!("{base}DslBase"));
    let partition_keys = schema.partition_keys.sorted_by_order();

    let mut defs = Vec::new();

    // Primary where chain: every partition key, then every clustering
    // column, then the terminal state.
    let chain = plan::plan(
        &format!("{base}Where"),
        &super_type,
        &schema.partition_keys,
        &schema.clustering_columns,
        true,
    )?;
    let ctx = relation::ChainContext::new(&chain, &partition_keys);

    for desc in &chain.states {
        let mut def = TypeDefinition::from_state(desc);
        def.methods = relation::relation_methods(desc, &ctx);
        json::augment_state(&mut def);
        defs.push(def);
    }

    let terminal_id = chain.terminal().type_id.clone();

    defs.extend(slice::slice_types(
        &schema.clustering_columns,
        &super_type,
        &terminal_id,
    ));
    defs.extend(lwt::condition_types(schema, &super_type, &terminal_id));

    let terminal_index = chain.len() - 1;
    json::augment_terminal(schema, &mut defs[terminal_index]);

    // Static-column variant: clustering filters make no sense against
    // static values, so the last partition state jumps to its own
    // terminal.
    if schema.has_static_columns() {
        let static_chain = plan::plan(
            &format!("{base}WhereStatic"),
            &super_type,
            &schema.partition_keys,
            &schema.clustering_columns,
            false,
        )?;
        let static_ctx = relation::ChainContext::new(&static_chain, &partition_keys);

        for desc in &static_chain.states {
            let mut def = TypeDefinition::from_state(desc);
            def.methods = relation::relation_methods(desc, &static_ctx);
            json::augment_state(&mut def);
            defs.push(def);
        }
    }

    verify_unique_names(&defs)?;

    Ok(defs)
}

fn verify_unique_names(defs: &[TypeDefinition]) -> Result<(), GenerateError> {
    let mut seen = BTreeSet::new();

    for def in defs {
        if !seen.insert(&def.id) {
            return Err(GenerateError::TypeNameCollision {
                name: def.id.to_string(),
            });
        }
    }

    Ok(())
}
