mod cursor;
pub mod error;
pub mod expression;
mod scanner;

pub use error::ParseError;

use tracing::trace;

use crate::Template;

/// Parser entry point.
pub struct Parser<'a> {
    source: &'a str,
    file_id: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Scan the template into literal runs and placeholders.
    ///
    /// No normalization happens here: a template without references parses
    /// to literals only.
    pub fn parse(&self) -> Result<Template, ParseError> {
        let parts = scanner::scan(self.source)?;
        trace!(
            parts = parts.len(),
            placeholders = parts.iter().filter(|p| p.is_placeholder()).count(),
            "scanned template"
        );
        Ok(Template {
            parts,
            source_id: self.file_id,
        })
    }
}
