// Single-slot pushback wrapper over a fallible line iterator.
use crate::core::error::Error;

/// Lookahead buffer over a once-iterable sequence of newline-stripped
/// lines. At most one line can be pushed back for re-reading; pushing
/// onto an occupied slot is a caller logic bug and panics rather than
/// surfacing as a recoverable error.
#[derive(Debug)]
pub struct Lookahead<I> {
    lines: I,
    slot: Option<Vec<u8>>,
}

impl<I> Lookahead<I>
where
    I: Iterator<Item = Result<Vec<u8>, Error>>,
{
    pub fn new(lines: I) -> Self {
        Self { lines, slot: None }
    }

    /// Stores one line to be returned by the next pull.
    ///
    /// # Panics
    /// Panics if a line is already buffered.
    pub fn pushback(&mut self, line: Vec<u8>) {
        assert!(self.slot.is_none(), "pushback onto occupied lookahead slot");
        self.slot = Some(line);
    }
}

impl<I> Iterator for Lookahead<I>
where
    I: Iterator<Item = Result<Vec<u8>, Error>>,
{
    type Item = Result<Vec<u8>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.slot.take() {
            return Some(Ok(line));
        }
        self.lines.next()
    }
}
