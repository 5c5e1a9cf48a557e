//! Application state for the web server.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use datadict::export::{list_dictionaries, load_dictionary};
use datadict::{DataDictionary, Result};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Directory the dictionaries are read from.
    pub dir: PathBuf,
    /// Loaded dictionaries keyed by dataset name.
    pub dictionaries: Arc<RwLock<BTreeMap<String, DataDictionary>>>,
}

impl AppState {
    /// Load every `*_data_dictionary.json` in `dir`.
    pub fn load(dir: PathBuf) -> Result<Self> {
        let dictionaries = read_dir(&dir)?;
        Ok(Self {
            dir,
            dictionaries: Arc::new(RwLock::new(dictionaries)),
        })
    }

    /// Re-read the directory, replacing what is loaded. Returns the dataset count.
    pub async fn reload(&self) -> Result<usize> {
        let fresh = read_dir(&self.dir)?;
        let count = fresh.len();
        *self.dictionaries.write().await = fresh;
        Ok(count)
    }
}

/// Files that fail to load are skipped with a warning.
fn read_dir(dir: &Path) -> Result<BTreeMap<String, DataDictionary>> {
    let mut dictionaries = BTreeMap::new();
    for path in list_dictionaries(dir)? {
        match load_dictionary(&path) {
            Ok(dict) => {
                debug!(path = %path.display(), dataset = %dict.dataset_name, "Loaded dictionary");
                dictionaries.insert(dict.dataset_name.clone(), dict);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable dictionary"),
        }
    }
    Ok(dictionaries)
}
