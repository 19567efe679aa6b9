/// Character cursor over a source string.
///
/// Tracks both the byte offset (for spans) and the 1-based character position
/// (for user-facing messages) of the next unread character.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|&(_, c)| c)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Consume `expected` if it is next.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a maximal run of ASCII digits. `None` if the run is empty.
    /// Values past `usize::MAX` saturate.
    pub(crate) fn eat_digits(&mut self) -> Option<usize> {
        let start = self.pos;
        let mut value = 0usize;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d as usize);
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// 1-based position of the next character.
    pub(crate) fn char_position(&self) -> usize {
        self.pos + 1
    }

    pub(crate) fn byte_offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source.len())
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn positions_count_characters_not_bytes() {
        let mut cursor = Cursor::new("é%1");
        assert_eq!(cursor.char_position(), 1);
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.char_position(), 2);
        assert_eq!(cursor.byte_offset(), 2);
    }

    #[test]
    fn digit_runs_are_greedy() {
        let mut cursor = Cursor::new("10test");
        assert_eq!(cursor.eat_digits(), Some(10));
        assert_eq!(cursor.peek(), Some('t'));
        assert_eq!(cursor.eat_digits(), None);
    }

    #[test]
    fn oversized_digit_runs_saturate() {
        let mut cursor = Cursor::new("99999999999999999999999999");
        assert_eq!(cursor.eat_digits(), Some(usize::MAX));
        assert!(cursor.peek().is_none());
        assert_eq!(cursor.byte_offset(), 26);
    }
}
