use derive_more::Display;
use serde::Serialize;

///
/// TypeRef
///
/// Semantic description of a column's value type. Opaque to this crate:
/// only the renderer ever interprets the path, so the descriptor model
/// stays language-neutral.
///

#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

///
/// ColumnRole
///
/// Where a column sits in the table layout. Partition and clustering
/// columns carry the key `order`; the rest are value columns.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ColumnRole {
    Clustering,
    Counter,
    Normal,
    Partition,
    Static,
    StaticCounter,
}

impl ColumnRole {
    /// Columns eligible for compare-and-set conditions.
    #[must_use]
    pub const fn supports_conditions(self) -> bool {
        matches!(self, Self::Normal | Self::Static)
    }

    #[must_use]
    pub const fn is_counter(self) -> bool {
        matches!(self, Self::Counter | Self::StaticCounter)
    }

    #[must_use]
    pub const fn is_static(self) -> bool {
        matches!(self, Self::Static | Self::StaticCounter)
    }

    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::Partition | Self::Clustering)
    }
}

///
/// IndexKind
///
/// Shape of the secondary index declared on a column. Decides which
/// containment predicates the generator may emit for it.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum IndexKind {
    Collection,
    Full,
    MapEntry,
    MapKey,
    MapValue,
}
