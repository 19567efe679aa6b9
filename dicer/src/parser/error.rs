use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Structural errors found while scanning a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `%[` with no closing `]`. `position` is the 1-based character
    /// position of the `%`.
    #[error("char {position}: dicer expression missing closing ]")]
    UnterminatedExpression { position: usize, span: Range<usize> },
}

impl ParseError {
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnterminatedExpression { span, .. } => span.clone(),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![
                Label::primary(file_id, self.span()).with_message("expression starts here"),
            ])
            .with_notes(vec!["close the expression with `]`".to_string()])
    }
}
