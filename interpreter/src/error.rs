use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use dicer::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("at least one input must be specified")]
    NoInputs,

    #[error("char {position}: dicer expression missing closing ]")]
    UnterminatedExpression { position: usize, span: Range<usize> },

    #[error("index {index}: out of bounds (inputs size {size})")]
    IndexOutOfBounds {
        index: usize,
        size: usize,
        span: Range<usize>,
    },
}

impl From<ParseError> for ExpandError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::UnterminatedExpression { position, span } => {
                ExpandError::UnterminatedExpression { position, span }
            }
        }
    }
}

impl ExpandError {
    /// Location in the template source, if the error has one.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ExpandError::NoInputs => None,
            ExpandError::UnterminatedExpression { span, .. }
            | ExpandError::IndexOutOfBounds { span, .. } => Some(span.clone()),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(self.to_string());
        match self {
            ExpandError::NoInputs => diagnostic,
            ExpandError::UnterminatedExpression { span, .. } => diagnostic
                .with_labels(vec![
                    Label::primary(file_id, span.clone()).with_message("expression starts here"),
                ])
                .with_notes(vec!["close the expression with `]`".to_string()]),
            ExpandError::IndexOutOfBounds { size, span, .. } => diagnostic.with_labels(vec![
                Label::primary(file_id, span.clone())
                    .with_message(format!("valid indices are 1 to {}", size)),
            ]),
        }
    }
}
