pub mod core;
pub mod cycler;
pub mod dictionary;
pub mod logging;
pub mod persistence;
pub mod session;
pub mod settings;

pub use crate::core::{
    DisplayPair,
    EntryCollection,
    LanguageSaverError,
    Level,
    VocabularyEntry,
};
pub use cycler::{
    CyclePolicy,
    Cycler,
    Direction,
};
pub use session::SessionHandle;
pub use settings::{
    SaverSettings,
    SettingsStore,
};
