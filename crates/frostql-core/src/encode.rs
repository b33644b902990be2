use crate::value::Value;
use thiserror::Error as ThisError;

///
/// EncodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EncodeError {
    #[error("column '{column}' rejected value: {reason}")]
    Rejected { column: String, reason: String },
}

impl EncodeError {
    pub fn rejected(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

///
/// ValueEncoder
///
/// External collaborator boundary: maps a raw bound value to its wire
/// form for one column. The DSL state keeps raw and encoded values in
/// separate, index-aligned lists so callers can re-bind or introspect
/// the raw form later.
///

pub trait ValueEncoder {
    fn encode(&self, column: &str, raw: &Value) -> Result<Value, EncodeError>;
}

///
/// PassthroughEncoder
///
/// Identity encoding. Used for tokens, verbatim JSON text, and tests.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughEncoder;

impl ValueEncoder for PassthroughEncoder {
    fn encode(&self, _column: &str, raw: &Value) -> Result<Value, EncodeError> {
        Ok(raw.clone())
    }
}
