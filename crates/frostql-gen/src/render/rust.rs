use crate::{
    ir::{BindingKind, BufferKind, MethodDefinition, StateRole, Transition, TypeDefinition, TypeId},
    render::{Render, RenderError},
};
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeSet;

///
/// RustRenderer
///
/// Emits one struct per generated type, embedding the per-entity base
/// (which carries the `frostql_core::DslState` and the entity's value
/// encoder). Branch methods move the base into a freshly constructed
/// return type; Loop methods return the same instance, or re-type it by
/// moving the base when the loop target differs from the defining type.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RustRenderer;

impl Render for RustRenderer {
    fn render(&self, defs: &[TypeDefinition]) -> Result<String, RenderError> {
        let mut tokens = TokenStream::new();

        for base in distinct_super_types(defs) {
            tokens.extend(render_base(base));
        }

        let entries = EntryPoints::collect(defs);
        for def in defs {
            tokens.extend(render_type(def, &entries)?);
        }

        Ok(tokens.to_string())
    }
}

/// Entry methods the IR leaves implicit: hops from the chain into the
/// nested slice and condition types.
struct EntryPoints {
    /// Slice types, entered from the first clustering state.
    slices: Vec<TypeId>,
    /// Condition types, entered from the terminal state they loop to.
    conditions: Vec<(String, TypeId, TypeId)>,
    first_clustering: Option<TypeId>,
}

impl EntryPoints {
    fn collect(defs: &[TypeDefinition]) -> Self {
        let slices = defs
            .iter()
            .filter(|d| d.role == StateRole::SliceState)
            .map(|d| d.id.clone())
            .collect();

        let conditions = defs
            .iter()
            .filter(|d| d.role == StateRole::ConditionState)
            .filter_map(|d| {
                let column = d.bound_column.as_ref()?;
                Some((
                    format!("if_{}", column.sanitized_name()),
                    d.id.clone(),
                    d.return_type.clone(),
                ))
            })
            .collect();

        let first_clustering = defs
            .iter()
            .find(|d| d.role == StateRole::ClusteringKeyState)
            .map(|d| d.id.clone());

        Self {
            slices,
            conditions,
            first_clustering,
        }
    }
}

fn distinct_super_types(defs: &[TypeDefinition]) -> BTreeSet<&TypeId> {
    defs.iter().map(|d| &d.super_type).collect()
}

fn render_base(base: &TypeId) -> TokenStream {
    let ident = format_ident!("{}", base.as_str());

    quote! {
        pub struct #ident {
            state: ::frostql_core::DslState,
            encoder: ::std::sync::Arc<dyn ::frostql_core::ValueEncoder>,
        }

        impl #ident {
            pub fn new(encoder: ::std::sync::Arc<dyn ::frostql_core::ValueEncoder>) -> Self {
                Self {
                    state: ::frostql_core::DslState::new(),
                    encoder,
                }
            }
        }
    }
}

fn render_type(def: &TypeDefinition, entries: &EntryPoints) -> Result<TokenStream, RenderError> {
    let ident = format_ident!("{}", def.id.as_str());
    let base = format_ident!("{}", def.super_type.as_str());

    // Slice and condition type names keep their wire-derived casing.
    let attr = if def.id.as_str().contains('_') {
        quote!(#[allow(non_camel_case_types)])
    } else {
        quote!()
    };

    let mut methods = TokenStream::new();
    for method in &def.methods {
        methods.extend(render_method(def, method)?);
    }

    if Some(&def.id) == entries.first_clustering.as_ref() {
        for slice in &entries.slices {
            methods.extend(render_entry(&format!("slice_{slice}"), slice));
        }
    }
    if def.role == StateRole::TerminalState {
        for (name, target, looped_from) in &entries.conditions {
            if looped_from == &def.id {
                methods.extend(render_entry(name, target));
            }
        }
        methods.extend(render_accessors());
    }

    Ok(quote! {
        #attr
        pub struct #ident {
            base: #base,
        }

        impl #ident {
            pub fn new(base: #base) -> Self {
                Self { base }
            }

            #methods
        }
    })
}

fn render_entry(name: &str, target: &TypeId) -> TokenStream {
    let name = format_ident!("{}", name.to_case(Case::Snake));
    let target = format_ident!("{}", target.as_str());

    quote! {
        pub fn #name(self) -> #target {
            #target { base: self.base }
        }
    }
}

// The runtime-boundary triple: predicate text plus the two
// index-aligned bound-value lists.
fn render_accessors() -> TokenStream {
    quote! {
        pub fn where_clause(&self) -> String {
            self.base.state.where_clause()
        }

        pub fn if_clause(&self) -> String {
            self.base.state.if_clause()
        }

        pub fn set_clause(&self) -> String {
            self.base.state.set_clause()
        }

        pub fn raw_values(&self) -> &[::frostql_core::Value] {
            self.base.state.raw_values()
        }

        pub fn encoded_values(&self) -> &[::frostql_core::Value] {
            self.base.state.encoded_values()
        }
    }
}

fn render_method(
    def: &TypeDefinition,
    method: &MethodDefinition,
) -> Result<TokenStream, RenderError> {
    let name = format_ident!("{}", method.name);
    let ret = format_ident!("{}", method.returns.as_str());
    let fragment = &method.fragment;

    let mut params = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let param_ident = format_ident!("{}", param.name);
        let ty = parse_type(param.ty.path())?;
        params.push(quote!(#param_ident: #ty));
    }

    let body = match method.binding {
        BindingKind::InList => {
            let param = format_ident!("{}", method.params[0].name);
            let column = &method.params[0].column;

            quote! {
                let values = #param
                    .into_iter()
                    .map(::frostql_core::Value::from)
                    .collect();
                self.base.state.where_in(#column, #fragment, values, &*self.base.encoder)?;
            }
        }
        BindingKind::Encoded => {
            let append = append_call(method.buffer);
            let binds = method.params.iter().map(|param| {
                let param_ident = format_ident!("{}", param.name);
                let column = &param.column;

                quote! {
                    self.base.state.bind_encoded(
                        #column,
                        ::frostql_core::Value::from(#param_ident),
                        &*self.base.encoder,
                    )?;
                }
            });

            quote! {
                self.base.state.#append(#fragment);
                #(#binds)*
            }
        }
        BindingKind::Passthrough => {
            let append = append_call(method.buffer);
            let binds = method.params.iter().map(|param| {
                let param_ident = format_ident!("{}", param.name);

                quote! {
                    self.base.state.bind_passthrough(::frostql_core::Value::from(#param_ident));
                }
            });

            quote! {
                self.base.state.#append(#fragment);
                #(#binds)*
            }
        }
    };

    let advance = if method.transition == Transition::Loop && method.returns == def.id {
        quote!(Ok(self))
    } else {
        quote!(Ok(#ret { base: self.base }))
    };

    Ok(quote! {
        pub fn #name(
            mut self,
            #(#params),*
        ) -> ::core::result::Result<#ret, ::frostql_core::Error> {
            #body
            #advance
        }
    })
}

fn append_call(buffer: BufferKind) -> proc_macro2::Ident {
    match buffer {
        BufferKind::Where => format_ident!("append_where"),
        BufferKind::If => format_ident!("append_if"),
        BufferKind::Set => format_ident!("append_set"),
    }
}

fn parse_type(path: &str) -> Result<syn::Type, RenderError> {
    syn::parse_str(path).map_err(|e| RenderError::InvalidTypePath {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
