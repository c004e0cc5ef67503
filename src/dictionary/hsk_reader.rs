use std::time::Instant;

use super::provider::ResourceProvider;
use crate::core::{
    EntryCollection,
    LanguageSaverError,
    Level,
    VocabularyEntry,
};

const FIELD_SEPARATOR: char = '\t';
const WORD_FIELD: usize = 0;
const PRONUNCIATION_FIELD: usize = 3;
const DEFINITION_FIELD: usize = 4;
const MIN_FIELDS: usize = DEFINITION_FIELD + 1;

/// A line that was skipped because it had too few fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize, // 1-based
    pub fields: usize,
}

impl From<&SkippedLine> for LanguageSaverError {
    fn from(skipped: &SkippedLine) -> Self {
        LanguageSaverError::MalformedLine { line: skipped.line, fields: skipped.fields }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedDictionary {
    pub entries: Vec<VocabularyEntry>,
    pub skipped: Vec<SkippedLine>,
}

pub fn resource_for_level(prefix: &str, level: Level) -> String {
    level.resource_name(prefix)
}

/// Parses tab-separated dictionary text.
///
/// Each non-empty line is `word \t _ \t _ \t pronunciation \t definition [\t ...]`.
/// Lines with fewer than five fields are skipped and reported in `skipped`.
pub fn parse_entries(text: &str) -> ParsedDictionary {
    let mut parsed = ParsedDictionary::default();

    // `lines` handles \n and \r\n; a lone \r still separates records
    let records = text
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split('\r').map(move |record| (idx + 1, record)))
        .filter(|(_, record)| !record.is_empty());

    for (line_number, record) in records {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();

        if fields.len() < MIN_FIELDS {
            let skipped = SkippedLine { line: line_number, fields: fields.len() };
            tracing::warn!(error = %LanguageSaverError::from(&skipped), "Skipping dictionary line");
            parsed.skipped.push(skipped);
            continue;
        }

        parsed.entries.push(VocabularyEntry::new(
            fields[WORD_FIELD],
            fields[PRONUNCIATION_FIELD],
            fields[DEFINITION_FIELD],
        ));
    }

    parsed
}

pub fn load_parsed<P: ResourceProvider + ?Sized>(
    provider: &P,
    resource: &str,
) -> Result<ParsedDictionary, LanguageSaverError> {
    let start = Instant::now();
    let text = provider.read_resource(resource)?;
    let parsed = parse_entries(&text);

    tracing::info!(
        resource,
        entries = parsed.entries.len(),
        skipped = parsed.skipped.len(),
        "Loaded dictionary ({:.1}ms)",
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(parsed)
}

pub fn load_entries<P: ResourceProvider + ?Sized>(
    provider: &P,
    resource: &str,
) -> Result<EntryCollection, LanguageSaverError> {
    load_parsed(provider, resource).map(|parsed| parsed.entries.into())
}

/// Like [`load_entries`], but a failed load is logged and yields an empty
/// collection. Hosts without an error surface should use this.
pub fn load_entries_or_empty<P: ResourceProvider + ?Sized>(
    provider: &P,
    resource: &str,
) -> EntryCollection {
    match load_entries(provider, resource) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(resource, error = %e, "Failed to load dictionary, showing nothing");
            EntryCollection::empty()
        }
    }
}
