pub mod sampling;
pub mod sequential;

use std::{
    fmt,
    str::FromStr,
};

use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};
pub use sampling::{
    SamplingCycler,
    SamplingState,
};
pub use sequential::{
    SequentialCycler,
    SequentialState,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    DisplayPair,
    EntryCollection,
    VocabularyEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Which selection policy drives the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Shuffle once, then walk in order with wrap-around.
    #[default]
    Sequential,
    /// Draw at random without replacement, refilling when exhausted.
    Sampling,
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CyclePolicy::Sequential => write!(f, "sequential"),
            CyclePolicy::Sampling => write!(f, "sampling"),
        }
    }
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(CyclePolicy::Sequential),
            "sampling" | "random" => Ok(CyclePolicy::Sampling),
            other => Err(format!("Unknown cycle policy '{}'", other)),
        }
    }
}

/// Owned cycler bookkeeping, independent of the entries it indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyclerState {
    Sequential(SequentialState),
    Sampling(SamplingState),
}

impl CyclerState {
    pub fn initial(policy: CyclePolicy, len: usize) -> Self {
        match policy {
            CyclePolicy::Sequential => CyclerState::Sequential(SequentialState::default()),
            CyclePolicy::Sampling => CyclerState::Sampling(SamplingState::full(len)),
        }
    }

    pub fn current(&self) -> Option<usize> {
        match self {
            CyclerState::Sequential(state) => state.current(),
            CyclerState::Sampling(state) => state.current(),
        }
    }
}

/// Applies one navigation event to `state` and returns the new state with the
/// pair to render. Sampling ignores `direction`.
pub fn transition<R: Rng + ?Sized>(
    state: CyclerState,
    direction: Direction,
    entries: &EntryCollection,
    rng: &mut R,
) -> (CyclerState, DisplayPair) {
    let next = match state {
        CyclerState::Sequential(state) => {
            CyclerState::Sequential(state.step(direction, entries.len()))
        }
        CyclerState::Sampling(state) => CyclerState::Sampling(state.step(entries.len(), rng)),
    };

    let display: DisplayPair = next.current().and_then(|index| entries.get(index)).into();
    (next, display)
}

/// The active cycler, with its policy fixed at construction.
#[derive(Debug, Clone)]
pub enum Cycler {
    Sequential(SequentialCycler),
    Sampling(SamplingCycler<StdRng>),
}

impl Cycler {
    /// Builds a cycler for `policy`. The sequential policy shuffles the
    /// entries once here; sampling seeds its own generator from `rng`.
    pub fn build<R: Rng>(policy: CyclePolicy, entries: &EntryCollection, rng: &mut R) -> Self {
        match policy {
            CyclePolicy::Sequential => Cycler::Sequential(SequentialCycler::shuffled(entries, rng)),
            CyclePolicy::Sampling => {
                Cycler::Sampling(SamplingCycler::with_rng(entries.clone(), StdRng::from_rng(rng)))
            }
        }
    }

    pub fn policy(&self) -> CyclePolicy {
        match self {
            Cycler::Sequential(_) => CyclePolicy::Sequential,
            Cycler::Sampling(_) => CyclePolicy::Sampling,
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> Option<&VocabularyEntry> {
        match self {
            Cycler::Sequential(cycler) => cycler.advance(direction),
            Cycler::Sampling(cycler) => cycler.cycle_next(),
        }
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        match self {
            Cycler::Sequential(cycler) => cycler.current(),
            Cycler::Sampling(cycler) => cycler.current(),
        }
    }

    pub fn display(&self) -> DisplayPair {
        self.current().into()
    }

    pub fn entries(&self) -> &EntryCollection {
        match self {
            Cycler::Sequential(cycler) => cycler.entries(),
            Cycler::Sampling(cycler) => cycler.entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(len: usize) -> EntryCollection {
        (0..len)
            .map(|i| VocabularyEntry::new(&i.to_string(), "p", "d"))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("sequential".parse::<CyclePolicy>(), Ok(CyclePolicy::Sequential));
        assert_eq!(" Sampling ".parse::<CyclePolicy>(), Ok(CyclePolicy::Sampling));
        assert!("shuffle".parse::<CyclePolicy>().is_err());
        assert_eq!(CyclePolicy::default(), CyclePolicy::Sequential);
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(serde_json::to_string(&CyclePolicy::Sampling).unwrap(), "\"sampling\"");
        let policy: CyclePolicy = serde_json::from_str("\"sequential\"").unwrap();
        assert_eq!(policy, CyclePolicy::Sequential);
    }

    #[test]
    fn test_transition_sequential_cycle() {
        let entries = collection(3);
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = CyclerState::initial(CyclePolicy::Sequential, entries.len());
        let mut shown = Vec::new();

        for _ in 0..4 {
            let (next, display) = transition(state, Direction::Forward, &entries, &mut rng);
            shown.push(display.headword);
            state = next;
        }

        assert_eq!(shown, vec!["1 p", "2 p", "0 p", "1 p"]);
    }

    #[test]
    fn test_transition_backward_from_start() {
        let entries = collection(3);
        let mut rng = StdRng::seed_from_u64(0);
        let state = CyclerState::initial(CyclePolicy::Sequential, entries.len());

        let (_, display) = transition(state, Direction::Backward, &entries, &mut rng);
        assert_eq!(display.headword, "2 p");
    }

    #[test]
    fn test_transition_empty_is_blank() {
        let entries = EntryCollection::empty();
        let mut rng = StdRng::seed_from_u64(0);

        for policy in [CyclePolicy::Sequential, CyclePolicy::Sampling] {
            let state = CyclerState::initial(policy, 0);
            let (next, display) = transition(state.clone(), Direction::Forward, &entries, &mut rng);
            assert!(display.is_blank());
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_transition_sampling_ignores_direction() {
        let entries = collection(5);
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = CyclerState::initial(CyclePolicy::Sampling, entries.len());

        for direction in [Direction::Forward, Direction::Backward, Direction::Forward] {
            let (next, display) = transition(state, direction, &entries, &mut rng);
            assert!(!display.is_blank());
            state = next;
        }

        if let CyclerState::Sampling(sampling) = &state {
            assert_eq!(sampling.remaining().len(), 2);
        } else {
            panic!("Expected sampling state");
        }
    }

    #[test]
    fn test_build_keeps_policy_and_entries() {
        let entries = collection(6);
        let mut rng = StdRng::seed_from_u64(5);

        let sequential = Cycler::build(CyclePolicy::Sequential, &entries, &mut rng);
        assert_eq!(sequential.policy(), CyclePolicy::Sequential);
        assert_eq!(sequential.entries().len(), 6);
        assert!(sequential.current().is_none());

        let mut sampling = Cycler::build(CyclePolicy::Sampling, &entries, &mut rng);
        assert_eq!(sampling.policy(), CyclePolicy::Sampling);
        assert!(sampling.navigate(Direction::Backward).is_some());
    }

    #[test]
    fn test_navigate_single_entry() {
        let entries = collection(1);
        let mut rng = StdRng::seed_from_u64(1);

        for policy in [CyclePolicy::Sequential, CyclePolicy::Sampling] {
            let mut cycler = Cycler::build(policy, &entries, &mut rng);
            for direction in [Direction::Forward, Direction::Backward, Direction::Forward] {
                assert_eq!(cycler.navigate(direction).map(|e| e.headword.as_str()), Some("0 p"));
            }
        }
    }
}
