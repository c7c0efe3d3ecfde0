use std::{
    collections::BTreeMap,
    env,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::{KeyValueStore, StoreError};

/// Environment variable naming the store file.
pub(crate) const STORE_PATH_ENV: &str = "BLOCKFALL_STORE";

/// Key-value store persisted as a flat JSON object of strings.
///
/// The whole file is rewritten on every [`KeyValueStore::set`].
#[derive(Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// `$BLOCKFALL_STORE`, else `blockfall/store.json` under the user's
    /// config directory, else `blockfall-store.json` in the working directory.
    pub(crate) fn default_path() -> PathBuf {
        let var = |name| env::var_os(name).filter(|value: &OsString| !value.is_empty());
        if let Some(explicit) = var(STORE_PATH_ENV) {
            return PathBuf::from(explicit);
        }
        let config_dir = var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|home| Path::new(&home).join(".config")));
        match config_dir {
            Some(dir) => dir.join("blockfall").join("store.json"),
            None => PathBuf::from("blockfall-store.json"),
        }
    }

    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is reported and treated as empty; it is replaced on the next write.
    pub(crate) fn open(path: PathBuf) -> anyhow::Result<Self> {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    values: BTreeMap::new(),
                });
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read store file: {}", path.display()));
            }
        };
        let values = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            eprintln!("Ignoring unreadable store file {}: {e}", path.display());
            BTreeMap::new()
        });
        Ok(Self { path, values })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        self.write().map_err(|e| StoreError::new(key, e))
    }
}

#[cfg(test)]
mod tests {
    use std::process;

    use blockfall_engine::{HIGH_SCORE_KEY, HighScore};

    use super::*;

    /// Fresh scratch directory for one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("blockfall-{}-{name}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = scratch_dir("missing");
        let store = JsonFileStore::open(dir.join("store.json")).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY), None);
        assert!(!dir.exists());
    }

    #[test]
    fn test_set_persists_and_creates_directories() {
        let dir = scratch_dir("persist");
        let path = dir.join("nested").join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set(HIGH_SCORE_KEY, "700".to_owned()).unwrap();

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get(HIGH_SCORE_KEY).as_deref(), Some("700"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(path).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY), None);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_high_score_survives_reopen() {
        let dir = scratch_dir("high-score");
        let path = dir.join("store.json");

        let mut high_score = HighScore::load(JsonFileStore::open(path.clone()).unwrap());
        assert_eq!(high_score.best(), 0);
        assert!(high_score.submit(400).unwrap());

        let high_score = HighScore::load(JsonFileStore::open(path).unwrap());
        assert_eq!(high_score.best(), 400);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_write_failure_is_store_error() {
        let dir = scratch_dir("blocked");
        let parent = dir.join("parent");
        let mut store = JsonFileStore::open(parent.join("store.json")).unwrap();

        // A regular file where the parent directory should be.
        fs::create_dir_all(&dir).unwrap();
        fs::write(&parent, "").unwrap();

        let err = store.set(HIGH_SCORE_KEY, "1".to_owned()).unwrap_err();
        assert_eq!(err.key(), HIGH_SCORE_KEY);
        fs::remove_dir_all(dir).unwrap();
    }
}
