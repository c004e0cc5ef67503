use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};

use crate::core::{
    DisplayPair,
    EntryCollection,
    VocabularyEntry,
};

/// Indices not yet shown since the last refill, plus the one on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplingState {
    remaining: Vec<usize>,
    current: Option<usize>,
}

impl SamplingState {
    pub fn full(len: usize) -> Self {
        SamplingState { remaining: (0..len).collect(), current: None }
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Draws one index uniformly from the pool, refilling it from all `len`
    /// indices first if it ran dry. With no entries the state is returned
    /// unchanged.
    ///
    /// A refill can hand back the entry that was just shown.
    pub fn step<R: Rng + ?Sized>(mut self, len: usize, rng: &mut R) -> Self {
        if len == 0 {
            return self;
        }

        // Drop anything that no longer fits the collection
        self.remaining.retain(|&index| index < len);
        if self.remaining.is_empty() {
            self.remaining.extend(0..len);
        }

        let position = rng.random_range(0..self.remaining.len());
        self.current = Some(self.remaining.swap_remove(position));
        self
    }
}

/// Random draws without replacement; ignores navigation direction.
#[derive(Debug, Clone)]
pub struct SamplingCycler<R = StdRng> {
    entries: EntryCollection,
    state: SamplingState,
    rng: R,
}

impl SamplingCycler<StdRng> {
    pub fn new(entries: EntryCollection) -> Self {
        Self::with_rng(entries, StdRng::from_os_rng())
    }
}

impl<R: Rng> SamplingCycler<R> {
    pub fn with_rng(entries: EntryCollection, rng: R) -> Self {
        let state = SamplingState::full(entries.len());
        SamplingCycler { entries, state, rng }
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    pub fn state(&self) -> &SamplingState {
        &self.state
    }

    pub fn cycle_next(&mut self) -> Option<&VocabularyEntry> {
        let state = std::mem::take(&mut self.state);
        self.state = state.step(self.entries.len(), &mut self.rng);
        tracing::debug!(
            index = ?self.state.current(),
            remaining = self.state.remaining().len(),
            "Sampling draw"
        );
        self.current()
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.state.current().and_then(|index| self.entries.get(index))
    }

    pub fn display(&self) -> DisplayPair {
        self.current().into()
    }
}
