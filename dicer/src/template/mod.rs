pub mod dice;
pub mod normalize;

use std::ops::Range;

use crate::template::dice::DiceExpression;

/// One piece of a scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text, with `%%` escapes already collapsed.
    Literal(String),
    /// A bare `%N` reference: the input is substituted unmodified.
    Reference { index: usize, span: Range<usize> },
    /// A bracketed `%[...]` expression.
    Dice(DiceExpression),
}

impl TemplatePart {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, TemplatePart::Literal(_))
    }
}
