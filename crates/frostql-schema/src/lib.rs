pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for entity schema identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for column schema identifiers.
pub const MAX_COLUMN_NAME_LEN: usize = 64;

use crate::validate::SchemaError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::*,
        types::{ColumnRole, IndexKind, TypeRef},
        validate::SchemaError,
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaError(#[from] SchemaError),
}
