use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::LanguageSaverError;

pub const DEFAULT_RESOURCE_EXTENSION: &str = "txt";

/// Source of raw dictionary text, looked up by resource name (e.g. `hsk2`).
pub trait ResourceProvider: Send + Sync {
    fn read_resource(&self, name: &str) -> Result<String, LanguageSaverError>;
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn read_resource(&self, name: &str) -> Result<String, LanguageSaverError> {
        (**self).read_resource(name)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for std::sync::Arc<P> {
    fn read_resource(&self, name: &str) -> Result<String, LanguageSaverError> {
        (**self).read_resource(name)
    }
}

/// Reads `<dir>/<name>.<extension>` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
    extension: String,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryProvider { dir: dir.into(), extension: DEFAULT_RESOURCE_EXTENSION.to_string() }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.extension))
    }
}

impl ResourceProvider for DirectoryProvider {
    fn read_resource(&self, name: &str) -> Result<String, LanguageSaverError> {
        let path = self.resource_path(name);

        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(LanguageSaverError::ResourceNotFound(path.display().to_string()))
            }
            Err(e) => Err(LanguageSaverError::ResourceUnreadable {
                name: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// In-memory resources, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    resources: HashMap<String, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, name: &str, text: &str) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.resources.insert(name.to_string(), text.to_string());
    }
}

impl ResourceProvider for MemoryProvider {
    fn read_resource(&self, name: &str) -> Result<String, LanguageSaverError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| LanguageSaverError::ResourceNotFound(name.to_string()))
    }
}
