pub mod errors;
pub mod models;

pub use errors::LanguageSaverError;
pub use models::{ DisplayPair, EntryCollection, Level, VocabularyEntry };
