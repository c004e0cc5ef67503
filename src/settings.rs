use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

use crate::{
    core::{
        LanguageSaverError,
        Level,
    },
    cycler::CyclePolicy,
    dictionary::{
        DirectoryProvider,
        DEFAULT_RESOURCE_PREFIX,
    },
    persistence::{
        get_app_data_dir,
        get_data_file_path,
        load_json_or_default,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_INTERVAL_SECS: u64 = 10;
const RESOURCE_DIR: &str = "resources";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverSettings {
    #[serde(deserialize_with = "deserialize_level_or_default")]
    pub level: Level,
    pub policy: CyclePolicy,
    pub interval_secs: u64,
    pub resource_prefix: String,
    pub resource_dir: Option<PathBuf>,
}

impl Default for SaverSettings {
    fn default() -> Self {
        Self {
            level: Level::DEFAULT,
            policy: CyclePolicy::default(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
            resource_dir: None,
        }
    }
}

impl SaverSettings {
    /// Auto-advance period. Never zero.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn resource_name(&self) -> String {
        self.level.resource_name(&self.resource_prefix)
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.resource_dir.clone().unwrap_or_else(|| get_app_data_dir().join(RESOURCE_DIR))
    }

    pub fn provider(&self) -> DirectoryProvider {
        DirectoryProvider::new(self.resource_dir())
    }
}

// A stored level of 0 (or garbage) falls back to level 1 instead of
// discarding the rest of the settings file.
fn deserialize_level_or_default<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let level = raw
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| Level::new(n).ok());

    Ok(level.unwrap_or_else(|| {
        tracing::warn!(stored = %raw, "Invalid stored level, using {}", Level::DEFAULT);
        Level::DEFAULT
    }))
}

/// Settings persisted as JSON in the user data directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn default_location() -> Self {
        Self::at(get_data_file_path(SETTINGS_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_or_default(&self) -> SaverSettings {
        load_json_or_default(&self.path)
    }

    pub fn save(&self, settings: &SaverSettings) -> Result<(), LanguageSaverError> {
        save_json(settings, &self.path)
    }

    pub fn set_level(&self, level: Level) -> Result<SaverSettings, LanguageSaverError> {
        let mut settings = self.load_or_default();
        settings.level = level;
        self.save(&settings)?;
        tracing::info!(%level, "Level saved");
        Ok(settings)
    }
}
