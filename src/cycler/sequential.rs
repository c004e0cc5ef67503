use rand::Rng;

use super::Direction;
use crate::core::{
    DisplayPair,
    EntryCollection,
    VocabularyEntry,
};

/// Position of a wrap-around walk over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialState {
    index: usize,
    shown: bool,
}

impl SequentialState {
    pub fn at(index: usize) -> Self {
        SequentialState { index, shown: false }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the entry on screen, if anything has been shown yet.
    pub fn current(&self) -> Option<usize> {
        self.shown.then_some(self.index)
    }

    /// Moves one step in `direction` over `len` entries. With no entries the
    /// state is returned unchanged.
    pub fn step(self, direction: Direction, len: usize) -> Self {
        if len == 0 {
            return self;
        }

        // Keep the index in range even if the collection shrank under it
        let index = self.index % len;
        let index = match direction {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        };

        SequentialState { index, shown: true }
    }
}

/// Walks the collection in order, wrapping at both ends.
///
/// The collection is expected to be shuffled once up front (see
/// [`SequentialCycler::shuffled`]) so the walk still looks random.
#[derive(Debug, Clone)]
pub struct SequentialCycler {
    entries: EntryCollection,
    state: SequentialState,
}

impl SequentialCycler {
    pub fn new(entries: EntryCollection) -> Self {
        SequentialCycler { entries, state: SequentialState::default() }
    }

    pub fn shuffled<R: Rng + ?Sized>(entries: &EntryCollection, rng: &mut R) -> Self {
        Self::new(entries.shuffled(rng))
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    pub fn state(&self) -> SequentialState {
        self.state
    }

    pub fn advance_forward(&mut self) -> Option<&VocabularyEntry> {
        self.advance(Direction::Forward)
    }

    pub fn advance_backward(&mut self) -> Option<&VocabularyEntry> {
        self.advance(Direction::Backward)
    }

    pub fn advance(&mut self, direction: Direction) -> Option<&VocabularyEntry> {
        self.state = self.state.step(direction, self.entries.len());
        tracing::debug!(index = self.state.index(), ?direction, "Sequential advance");
        self.current()
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.state.current().and_then(|index| self.entries.get(index))
    }

    pub fn display(&self) -> DisplayPair {
        self.current().into()
    }
}
