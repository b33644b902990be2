use crate::prelude::*;
use std::fmt::{self, Display};

///
/// IndexSignature
///
/// A column plus the secondary index declared on it. Only the JSON and
/// index-predicate augmenters consume these.
///

#[derive(Clone, Debug, Serialize)]
pub struct IndexSignature {
    pub column: ColumnSignature,
    pub index_kind: IndexKind,
    pub index_implementation: String,
}

impl IndexSignature {
    pub fn new(
        column: ColumnSignature,
        index_kind: IndexKind,
        index_implementation: impl Into<String>,
    ) -> Self {
        Self {
            column,
            index_kind,
            index_implementation: index_implementation.into(),
        }
    }
}

impl Display for IndexSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.column.wire_name, self.index_kind)
    }
}
