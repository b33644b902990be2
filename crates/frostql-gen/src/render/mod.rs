//! Rendering: turns the language-neutral IR into target-language
//! source text. The IR carries every policy decision already; a
//! renderer only decides syntax, so swapping the target language means
//! swapping this module's implementation and nothing upstream.

mod rust;

pub use rust::RustRenderer;

use crate::ir::TypeDefinition;
use thiserror::Error as ThisError;

///
/// RenderError
///

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("parameter type '{path}' is not valid for this renderer: {reason}")]
    InvalidTypePath { path: String, reason: String },
}

///
/// Render
///

pub trait Render {
    /// Render one entity's full generated surface as source text.
    fn render(&self, defs: &[TypeDefinition]) -> Result<String, RenderError>;
}
