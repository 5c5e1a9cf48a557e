//! JSON persistence for exported artifacts.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::DICTIONARY_JSON_SUFFIX;
use crate::dictionary::DataDictionary;
use crate::error::{DictError, Result};

/// Create `path`'s parent directory if it does not exist yet.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DictError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Write text to a file, creating parent directories on demand.
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| DictError::io(path, e))
}

/// Serialize a value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| DictError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| {
        DictError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
    })
}

/// Load a dictionary previously written with [`write_json`].
///
/// # Example
///
/// ```no_run
/// let dict = datadict::export::load_dictionary("out/customers_data_dictionary.json").unwrap();
/// println!("{} columns", dict.columns.len());
/// ```
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<DataDictionary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DictError::io(path, e))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        DictError::Persistence(format!(
            "Failed to parse data dictionary '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Dictionary JSON files in a directory, sorted by file name.
pub fn list_dictionaries(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| DictError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(DICTIONARY_JSON_SUFFIX))
        })
        .collect();

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/value.json");

        write_json(&vec![1, 2, 3], &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let back: Vec<i32> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dictionary("/nonexistent/x_data_dictionary.json").unwrap_err();
        assert!(matches!(err, DictError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_data_dictionary.json");
        fs::write(&path, "{\"dataset_name\": 3}").unwrap();
        assert!(matches!(load_dictionary(&path), Err(DictError::Persistence(_))));
    }

    #[test]
    fn test_list_dictionaries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b_data_dictionary.json"), "{}").unwrap();
        fs::write(dir.path().join("a_data_dictionary.json"), "{}").unwrap();
        fs::write(dir.path().join("a_profile.json"), "{}").unwrap();

        let found = list_dictionaries(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_data_dictionary.json", "b_data_dictionary.json"]);

        assert!(list_dictionaries(dir.path().join("missing")).unwrap().is_empty());
    }
}
