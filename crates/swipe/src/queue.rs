//! The ordered queue of cards and its cursor.
//!
//! The cursor only moves forward, one step per swipe, except for rewind
//! which steps back exactly one. It never leaves `[0, len]`; at `len`
//! the queue is exhausted. The candidate list itself never changes.

use roster::Candidate;

#[derive(Debug, Clone)]
pub struct CardQueue {
    candidates: Vec<Candidate>,
    cursor: usize,
}

impl CardQueue {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    /// Card on top of the stack
    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor)
    }

    /// Up to `depth` cards from the cursor, top card first
    pub fn visible(&self, depth: usize) -> &[Candidate] {
        let start = self.cursor.min(self.candidates.len());
        let end = (start + depth).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// Move past the top card. Returns false when already exhausted.
    pub fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step back one card. Returns false at the start.
    pub fn rewind(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
