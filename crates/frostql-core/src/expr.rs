use crate::{error::PreconditionError, value::Value};
use std::fmt::{self, Display};

///
/// FunctionCall
///
/// A synthetic function-call expression over column references, used
/// for `token(...)` scans and the `toJson(column)` wrapper.
///
/// `toJson` calls sit at the top of an expression in the target query
/// grammar: they reject being nested inside another call and reject
/// literal arguments. Both are call-time precondition failures.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    name: String,
    args: Vec<FunctionArg>,
    nestable: bool,
}

///
/// FunctionArg
///

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionArg {
    Column(String),
    Literal(Value),
    Call(FunctionCall),
}

impl FunctionCall {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            nestable: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[FunctionArg] {
        &self.args
    }

    /// Whether this call may appear as an argument of another call.
    #[must_use]
    pub const fn is_nestable(&self) -> bool {
        self.nestable
    }

    pub fn push_column(&mut self, column: impl Into<String>) {
        self.args.push(FunctionArg::Column(column.into()));
    }

    pub fn push_literal(&mut self, value: Value) -> Result<(), PreconditionError> {
        if !self.nestable {
            return Err(PreconditionError::LiteralInFunction {
                function: self.name.clone(),
            });
        }
        self.args.push(FunctionArg::Literal(value));

        Ok(())
    }

    pub fn push_call(&mut self, call: Self) -> Result<(), PreconditionError> {
        if !call.nestable {
            return Err(PreconditionError::NestedFunctionCall {
                function: call.name,
            });
        }
        self.args.push(FunctionArg::Call(call));

        Ok(())
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| match arg {
                FunctionArg::Column(name) => name.clone(),
                FunctionArg::Literal(value) => value.to_string(),
                FunctionArg::Call(call) => call.to_string(),
            })
            .collect();

        write!(f, "{}({})", self.name, args.join(","))
    }
}

/// Wrap a column reference as a `toJson(column)` expression.
/// The result refuses further nesting and literal arguments.
#[must_use]
pub fn to_json(column: impl Into<String>) -> FunctionCall {
    let mut call = FunctionCall::new("toJson");
    call.push_column(column);
    call.nestable = false;

    call
}

/// Build a `token(col1,col2,...)` expression over partition-key wire
/// names, for ring-position range scans.
#[must_use]
pub fn token<I, S>(columns: I) -> FunctionCall
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut call = FunctionCall::new("token");
    for column in columns {
        call.push_column(column);
    }

    call
}
