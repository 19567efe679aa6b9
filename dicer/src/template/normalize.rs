//! Auto-append of the first input.
//!
//! A template that never references an input still expands to something
//! useful: `%1` is appended (after a space, unless the template is empty).

use std::borrow::Cow;

use tracing::trace;

/// Whether `template` contains a `%N` or `%[` outside of a `%%` escape.
pub fn has_real_reference(template: &str) -> bool {
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
            }
            Some(d) if d.is_ascii_digit() => return true,
            Some('[') => return true,
            _ => {}
        }
    }

    false
}

/// Append a reference to input 1 when the template has none of its own.
pub fn normalize(template: &str, has_real_reference: bool) -> Cow<'_, str> {
    if has_real_reference {
        return Cow::Borrowed(template);
    }

    trace!("template has no input reference, appending %1");
    if template.is_empty() {
        Cow::Borrowed("%1")
    } else {
        Cow::Owned(format!("{} %1", template))
    }
}
