//! Forward-only, bounds-checked cursor over decoded elements

use super::pushdata::Element;

/// Cursor over an element slice
///
/// The position only moves forward and never exceeds the slice length, so
/// every access is either in bounds or `None`.
#[derive(Debug, Clone)]
pub struct ElementCursor<'s, 'a> {
    elements: &'s [Element<'a>],
    position: usize,
}

impl<'s, 'a> ElementCursor<'s, 'a> {
    pub fn new(elements: &'s [Element<'a>]) -> Self {
        Self {
            elements,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Element at the current position
    pub fn current(&self) -> Option<Element<'a>> {
        self.peek(0)
    }

    /// Element `offset` places ahead of the current position
    pub fn peek(&self, offset: usize) -> Option<Element<'a>> {
        self.position
            .checked_add(offset)
            .and_then(|index| self.elements.get(index))
            .copied()
    }

    /// The next `count` elements starting at the current position, only if
    /// all of them exist
    pub fn window(&self, count: usize) -> Option<&'s [Element<'a>]> {
        let end = self.position.checked_add(count)?;
        self.elements.get(self.position..end)
    }

    /// Everything from the current position to the end
    pub fn rest(&self) -> &'s [Element<'a>] {
        &self.elements[self.position..]
    }

    /// Move forward by `count`, stopping at the end
    pub fn advance(&mut self, count: usize) {
        self.position = self
            .position
            .saturating_add(count)
            .min(self.elements.len());
    }

    /// Take `count` elements if they all exist; otherwise leave the cursor
    /// untouched
    pub fn take(&mut self, count: usize) -> Option<&'s [Element<'a>]> {
        let window = self.window(count)?;
        self.position += count;
        Some(window)
    }

    /// Index of the first pipe separator at or after `from`
    pub fn find_pipe(&self, from: usize) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, element)| element.is_pipe())
            .map(|(index, _)| index)
    }

    /// Jump forward to `index` (clamped to the end). Backward moves are ignored.
    pub fn seek(&mut self, index: usize) {
        if index > self.position {
            self.position = index.min(self.elements.len());
        }
    }

    /// Jump to the end of the sequence
    pub fn finish(&mut self) {
        self.position = self.elements.len();
    }
}
