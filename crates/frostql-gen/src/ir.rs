use derive_more::Display;
use frostql_schema::prelude::*;

///
/// Intermediate representation
///
/// Language-neutral description of the generated typestate surface.
/// This layer contains no rendering decisions: a renderer is the only
/// host-language-specific piece, and every policy choice (transition,
/// buffer, binding) is recorded explicitly per method so it stays
/// auditable.
///

///
/// TypeId
///
/// Identity of one generated type. Ids are plain names; uniqueness is
/// enforced once per generation pass.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TypeId(String);

impl TypeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// Transition
///
/// How a predicate method leaves its state. Fixed per generated method
/// at generation time, never inferred at runtime.
///
/// - `Branch`: construct a fresh instance of the return type (advancing
///   along the chain; key positions are mandatory and not repeatable).
/// - `Loop`: the current instance, re-typed as the return type
///   (optional, repeatable filters at the same logical position).
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Transition {
    Branch,
    Loop,
}

///
/// Relation
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Relation {
    Eq,
    Gt,
    Gte,
    In,
    Lt,
    Lte,
    NotEq,
}

impl Relation {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::NotEq => "!=",
        }
    }

    /// Method-name fragment for this relation.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::NotEq => "not_eq",
        }
    }
}

///
/// BufferKind
///
/// Which accumulated buffer a method's fragment lands in.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum BufferKind {
    Where,
    If,
    Set,
}

///
/// BindingKind
///
/// How a method's parameters reach the raw/encoded value lists.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum BindingKind {
    /// Each parameter is bound raw and delegated to the column encoder.
    Encoded,
    /// Raw and encoded are the same value (tokens, verbatim JSON text).
    Passthrough,
    /// One list parameter: whole list raw, per-element encoded.
    InList,
}

///
/// ParamSpec
///

#[derive(Clone, Debug, Serialize)]
pub struct ParamSpec {
    pub name: String,
    /// Wire name of the column whose encoder handles this parameter.
    pub column: String,
    pub ty: TypeRef,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, column: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            ty: ty.into(),
        }
    }
}

///
/// MethodDefinition
///

#[derive(Clone, Debug, Serialize)]
pub struct MethodDefinition {
    pub name: String,
    pub params: Vec<ParamSpec>,
    /// Predicate or assignment text with `?` bind markers.
    pub fragment: String,
    pub buffer: BufferKind,
    pub binding: BindingKind,
    pub transition: Transition,
    pub returns: TypeId,
}

///
/// StateRole
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum StateRole {
    PartitionKeyState,
    ClusteringKeyState,
    TerminalState,
    /// Multi-column tuple restriction over a clustering prefix.
    SliceState,
    /// Compare-and-set condition surface for one column.
    ConditionState,
}

///
/// StateDescriptor
///

#[derive(Clone, Debug, Serialize)]
pub struct StateDescriptor {
    pub type_id: TypeId,
    /// Type produced when a method advances to a new sibling state;
    /// equals `type_id` for self-looping states.
    pub return_type: TypeId,
    /// Base type carrying the shared machinery (predicate buffers plus
    /// the bound/encoded value lists).
    pub super_type: TypeId,
    pub role: StateRole,
    pub bound_column: Option<ColumnSignature>,
}

///
/// StateChain
///
/// The planned, ordered sequence of states for one entity. Immutable
/// after planning; generated types are emitted once and never mutated.
///

#[derive(Clone, Debug, Serialize)]
pub struct StateChain {
    pub states: Vec<StateDescriptor>,
    pub partition_count: usize,
    pub clustering_count: usize,
}

impl StateChain {
    #[must_use]
    pub fn terminal(&self) -> &StateDescriptor {
        // Planner always appends exactly one terminal state.
        &self.states[self.states.len() - 1]
    }

    /// First state the chain transitions to after the partition key is
    /// fully bound (first clustering state, or the terminal).
    #[must_use]
    pub fn post_partition(&self) -> &StateDescriptor {
        &self.states[self.partition_count]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

///
/// TypeDefinition
///
/// One emitted type: a planned state descriptor plus its method set.
///

#[derive(Clone, Debug, Serialize)]
pub struct TypeDefinition {
    pub id: TypeId,
    pub role: StateRole,
    pub super_type: TypeId,
    pub return_type: TypeId,
    pub bound_column: Option<ColumnSignature>,
    pub methods: Vec<MethodDefinition>,
}

impl TypeDefinition {
    #[must_use]
    pub fn from_state(desc: &StateDescriptor) -> Self {
        Self {
            id: desc.type_id.clone(),
            role: desc.role,
            super_type: desc.super_type.clone(),
            return_type: desc.return_type.clone(),
            bound_column: desc.bound_column.clone(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        self.methods.iter().find(|m| m.name == name)
    }
}
