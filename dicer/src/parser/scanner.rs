use crate::parser::cursor::Cursor;
use crate::parser::error::ParseError;
use crate::parser::expression::parse_dice_expression;
use crate::template::TemplatePart;

// ---------------------------------------------------------------------------
// Template scanner: source text → literal runs and placeholders
// ---------------------------------------------------------------------------

pub(crate) fn scan(source: &str) -> Result<Vec<TemplatePart>, ParseError> {
    let mut cursor = Cursor::new(source);
    let mut parts = Vec::new();
    let mut literal = String::new();

    while let Some(c) = cursor.peek() {
        if c != '%' {
            literal.push(c);
            cursor.advance();
            continue;
        }

        match cursor.peek_nth(1) {
            // %% escape
            Some('%') => {
                literal.push('%');
                cursor.advance();
                cursor.advance();
            }

            Some(d) if d.is_ascii_digit() => {
                flush_literal(&mut literal, &mut parts);
                parts.push(scan_reference(&mut cursor));
            }

            Some('[') => {
                flush_literal(&mut literal, &mut parts);
                parts.push(scan_dice(&mut cursor)?);
            }

            // % before anything else is plain text, together with that character
            Some(other) => {
                literal.push('%');
                literal.push(other);
                cursor.advance();
                cursor.advance();
            }

            None => {
                literal.push('%');
                cursor.advance();
            }
        }
    }

    flush_literal(&mut literal, &mut parts);
    Ok(parts)
}

fn flush_literal(literal: &mut String, parts: &mut Vec<TemplatePart>) {
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
}

/// `%` followed by a digit run. Characters after the digits are left alone.
fn scan_reference(cursor: &mut Cursor<'_>) -> TemplatePart {
    let start = cursor.byte_offset();
    cursor.advance(); // %
    let index = cursor.eat_digits().unwrap_or(0);
    TemplatePart::Reference {
        index,
        span: start..cursor.byte_offset(),
    }
}

/// `%[` through the next `]`.
fn scan_dice(cursor: &mut Cursor<'_>) -> Result<TemplatePart, ParseError> {
    let start = cursor.byte_offset();
    let position = cursor.char_position();
    cursor.advance(); // %
    cursor.advance(); // [

    let body_start = cursor.byte_offset();
    let body_end = loop {
        let offset = cursor.byte_offset();
        match cursor.advance() {
            Some(']') => break offset,
            Some(_) => {}
            None => {
                return Err(ParseError::UnterminatedExpression {
                    position,
                    span: start..offset,
                });
            }
        }
    };

    let body = cursor.slice(body_start, body_end);
    let span = start..cursor.byte_offset();
    Ok(TemplatePart::Dice(parse_dice_expression(body, span)))
}
