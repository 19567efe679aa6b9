use std::ops::Range;

use crate::parser::cursor::Cursor;
use crate::template::dice::{DiceExpression, Operation, Position, Selector};

/// Parse the contents of a `%[...]` expression (brackets excluded).
///
/// ```text
/// expr      := index operation*
/// index     := digit+
/// operation := delimiter selector
/// delimiter := any single character
/// selector  := "-"? ( digit+ | "$" )
/// ```
///
/// Parsing is greedy and never fails. A missing index or position parses as
/// `0`, which no input or segment matches.
pub fn parse_dice_expression(body: &str, span: Range<usize>) -> DiceExpression {
    let mut cursor = Cursor::new(body);
    let index = cursor.eat_digits().unwrap_or(0);

    let mut operations = Vec::new();
    while let Some(delimiter) = cursor.advance() {
        let selector = parse_selector(&mut cursor);
        operations.push(Operation {
            delimiter,
            selector,
        });
    }

    DiceExpression {
        index,
        operations,
        span,
    }
}

fn parse_selector(cursor: &mut Cursor<'_>) -> Selector {
    let remove = cursor.eat('-');
    let position = if cursor.eat('$') {
        Position::Last
    } else {
        Position::Index(cursor.eat_digits().unwrap_or(0))
    };
    Selector { remove, position }
}
