use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::LanguageSaverError;

const APP_NAME: &str = "languagesaver";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, file_path: &Path) -> Result<(), LanguageSaverError> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    tracing::debug!(path = %file_path.display(), "Data saved");
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, LanguageSaverError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!(path = %file_path.display(), "Data loaded");
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %file_path.display(), error = %e, "Failed to load, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    fn scratch_file(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("languagesaver-persistence-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("nested").join("data.json")
    }

    #[test]
    fn test_missing_file_gives_default() {
        let path = scratch_file("missing");
        assert_eq!(load_json::<Sample>(&path).unwrap(), Sample::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("save");
        save_json(&Sample { value: 4 }, &path).unwrap();
        assert_eq!(load_json::<Sample>(&path).unwrap(), Sample { value: 4 });
        let _ = fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let path = scratch_file("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(load_json::<Sample>(&path).is_err());
        assert_eq!(load_json_or_default::<Sample>(&path), Sample::default());
        let _ = fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }
}
