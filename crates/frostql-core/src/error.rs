use thiserror::Error as ThisError;

///
/// PreconditionError
///
/// Call-time violations in the generated DSL surface. These are not
/// detectable at generation time; they surface to the DSL's caller and
/// leave the accumulated state untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PreconditionError {
    #[error("IN predicate on column '{column}' requires a non-empty argument list")]
    EmptyIn { column: String },

    #[error("function call '{function}' cannot take another function call as an argument")]
    NestedFunctionCall { function: String },

    #[error("function call '{function}' cannot carry a literal value")]
    LiteralInFunction { function: String },
}
