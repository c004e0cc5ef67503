use std::{
    fmt,
    sync::Arc,
};

use rand::{
    seq::SliceRandom,
    Rng,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::LanguageSaverError;

/// One flashcard: the word with its pronunciation, and its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub headword: String,   // "<word> <pronunciation>"
    pub definition: String,
}

impl VocabularyEntry {
    pub fn new(word: &str, pronunciation: &str, definition: &str) -> Self {
        VocabularyEntry {
            headword: format!("{} {}", word, pronunciation),
            definition: definition.to_string(),
        }
    }
}

/// Entries in load order. Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    entries: Arc<[VocabularyEntry]>,
}

impl EntryCollection {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        EntryCollection { entries: entries.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy of the collection in a random order.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut entries = self.entries.to_vec();
        entries.shuffle(rng);
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[VocabularyEntry] {
        &self.entries
    }
}

impl From<Vec<VocabularyEntry>> for EntryCollection {
    fn from(entries: Vec<VocabularyEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a VocabularyEntry;
    type IntoIter = std::slice::Iter<'a, VocabularyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The two strings a host renders. Both empty means nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayPair {
    pub headword: String,
    pub definition: String,
}

impl DisplayPair {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.headword.is_empty() && self.definition.is_empty()
    }
}

impl From<&VocabularyEntry> for DisplayPair {
    fn from(entry: &VocabularyEntry) -> Self {
        DisplayPair { headword: entry.headword.clone(), definition: entry.definition.clone() }
    }
}

impl From<Option<&VocabularyEntry>> for DisplayPair {
    fn from(entry: Option<&VocabularyEntry>) -> Self {
        entry.map(DisplayPair::from).unwrap_or_default()
    }
}

/// Difficulty tier, 1-based. Selects which dictionary resource is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    pub const DEFAULT: Level = Level(1);

    pub fn new(level: u32) -> Result<Self, LanguageSaverError> {
        if level == 0 {
            return Err(LanguageSaverError::InvalidLevel(level));
        }
        Ok(Level(level))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `hsk` + level 2 -> `hsk2`
    pub fn resource_name(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Level {
    type Error = LanguageSaverError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Level::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    #[test]
    fn test_entry_headword_joins_word_and_pronunciation() {
        let entry = VocabularyEntry::new("老", "lǎo", "old");
        assert_eq!(entry.headword, "老 lǎo");
        assert_eq!(entry.definition, "old");
    }

    #[test]
    fn test_shuffle_keeps_every_entry() {
        let collection: EntryCollection = (0..20)
            .map(|i| VocabularyEntry::new(&i.to_string(), "p", "d"))
            .collect::<Vec<_>>()
            .into();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = collection.shuffled(&mut rng);

        assert_eq!(shuffled.len(), collection.len());
        for entry in &collection {
            assert!(shuffled.iter().any(|e| e == entry));
        }
        // Original order is untouched
        assert_eq!(collection.get(0).map(|e| e.headword.as_str()), Some("0 p"));
    }

    #[test]
    fn test_shuffle_of_empty_collection() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(EntryCollection::empty().shuffled(&mut rng).is_empty());
    }

    #[test]
    fn test_display_pair_from_missing_entry_is_blank() {
        assert!(DisplayPair::from(None).is_blank());
        let entry = VocabularyEntry::new("好", "hǎo", "good");
        let pair = DisplayPair::from(Some(&entry));
        assert_eq!(pair.headword, "好 hǎo");
        assert!(!pair.is_blank());
    }

    #[test]
    fn test_level_resource_name() {
        let level = Level::new(2).unwrap();
        assert_eq!(level.resource_name("hsk"), "hsk2");
        assert_eq!(Level::default().resource_name("hsk"), "hsk1");
    }

    #[test]
    fn test_level_zero_rejected() {
        assert!(matches!(Level::new(0), Err(LanguageSaverError::InvalidLevel(0))));
        assert!(serde_json::from_str::<Level>("0").is_err());
        assert_eq!(serde_json::from_str::<Level>("3").unwrap().get(), 3);
    }
}
