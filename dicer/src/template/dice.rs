use std::fmt;
use std::ops::Range;

/// A `%[index op op ...]` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceExpression {
    /// 1-based input index.
    pub index: usize,
    /// Operations applied left to right to the selected input.
    pub operations: Vec<Operation>,
    /// Byte range of the whole `%[...]` in the template source.
    pub span: Range<usize>,
}

/// Split on `delimiter`, then select or remove one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub delimiter: char,
    pub selector: Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    /// Leading `-`: drop the segment instead of keeping it.
    pub remove: bool,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// 1-based segment number. `0` never matches a segment.
    Index(usize),
    /// `$`: the last segment.
    Last,
}

impl Position {
    /// Resolve against a segment count, still 1-based.
    pub fn resolve(self, segment_count: usize) -> usize {
        match self {
            Position::Index(n) => n,
            Position::Last => segment_count,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delimiter)?;
        if self.selector.remove {
            write!(f, "-")?;
        }
        match self.selector.position {
            Position::Index(n) => write!(f, "{}", n),
            Position::Last => write!(f, "$"),
        }
    }
}
