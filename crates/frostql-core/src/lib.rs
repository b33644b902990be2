pub mod encode;
pub mod error;
pub mod expr;
pub mod state;
pub mod value;

use thiserror::Error as ThisError;

// re-exports
pub use encode::{EncodeError, PassthroughEncoder, ValueEncoder};
pub use error::PreconditionError;
pub use expr::{FunctionArg, FunctionCall, to_json, token};
pub use state::DslState;
pub use value::Value;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        encode::{EncodeError, ValueEncoder},
        error::PreconditionError,
        state::DslState,
        value::Value,
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    EncodeError(#[from] EncodeError),

    #[error(transparent)]
    PreconditionError(#[from] PreconditionError),
}
