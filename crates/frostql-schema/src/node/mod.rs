mod column;
mod entity;
mod index;

pub use column::{ColumnList, ColumnSignature};
pub use entity::Schema;
pub use index::IndexSignature;
