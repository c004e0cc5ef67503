pub mod hsk_reader;
pub mod provider;

pub use hsk_reader::{
    load_entries,
    load_entries_or_empty,
    load_parsed,
    parse_entries,
    resource_for_level,
    ParsedDictionary,
    SkippedLine,
};
pub use provider::{ DirectoryProvider, MemoryProvider, ResourceProvider };

pub const DEFAULT_RESOURCE_PREFIX: &str = "hsk";
