use std::ops::Range;

use dicer::template::TemplatePart;
use dicer::template::dice::{DiceExpression, Operation};
use tracing::trace;

use crate::error::ExpandError;

/// Evaluate one template part against the inputs.
pub fn evaluate<S: AsRef<str>>(part: &TemplatePart, inputs: &[S]) -> Result<String, ExpandError> {
    match part {
        TemplatePart::Literal(s) => Ok(s.clone()),
        TemplatePart::Reference { index, span } => {
            resolve_input(*index, span, inputs).map(str::to_string)
        }
        TemplatePart::Dice(expr) => evaluate_dice(expr, inputs),
    }
}

/// Evaluate a `%[...]` expression: look up the input, then apply each
/// operation to the running value.
pub fn evaluate_dice<S: AsRef<str>>(
    expr: &DiceExpression,
    inputs: &[S],
) -> Result<String, ExpandError> {
    let input = resolve_input(expr.index, &expr.span, inputs)?;
    let mut current = input.to_string();
    for operation in &expr.operations {
        current = apply_operation(&current, operation);
        trace!(operation = %operation, result = %current, "applied dice operation");
    }
    Ok(current)
}

/// Look up a 1-based input index.
fn resolve_input<'a, S: AsRef<str>>(
    index: usize,
    span: &Range<usize>,
    inputs: &'a [S],
) -> Result<&'a str, ExpandError> {
    index
        .checked_sub(1)
        .and_then(|i| inputs.get(i))
        .map(|input| input.as_ref())
        .ok_or_else(|| ExpandError::IndexOutOfBounds {
            index,
            size: inputs.len(),
            span: span.clone(),
        })
}

/// Split `current` on the operation's delimiter and keep (or drop) one segment.
///
/// Empty segments are preserved. Selecting a missing segment yields `""`;
/// removing a missing segment leaves the value unchanged.
pub fn apply_operation(current: &str, operation: &Operation) -> String {
    let mut segments: Vec<&str> = current.split(operation.delimiter).collect();
    let position = operation.selector.position.resolve(segments.len());
    let slot = position
        .checked_sub(1)
        .filter(|&i| i < segments.len());

    if operation.selector.remove {
        if let Some(i) = slot {
            segments.remove(i);
        }
        let mut buf = [0u8; 4];
        let delimiter: &str = operation.delimiter.encode_utf8(&mut buf);
        segments.join(delimiter)
    } else {
        slot.map(|i| segments[i].to_string()).unwrap_or_default()
    }
}
