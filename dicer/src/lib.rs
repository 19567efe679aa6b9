pub mod parser;
pub mod template;

use crate::template::TemplatePart;

/// A parsed dicer template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Literal runs and placeholders, in source order.
    pub parts: Vec<TemplatePart>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}
