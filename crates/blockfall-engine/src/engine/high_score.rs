use std::{collections::HashMap, io};

/// Key under which the best score is stored.
pub const HIGH_SCORE_KEY: &str = "highscore";

/// External string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to store '{key}'")]
pub struct StoreError {
    key: String,
    source: io::Error,
}

impl StoreError {
    #[must_use]
    pub fn new(key: &str, source: io::Error) -> Self {
        Self {
            key: key.to_owned(),
            source,
        }
    }

    /// Returns the key whose write failed.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// In-process store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Best score, backed by a [`KeyValueStore`].
///
/// The in-memory value never decreases, even if writing it back fails.
///
/// # Example
///
/// ```
/// use blockfall_engine::{HighScore, MemoryStore};
///
/// let mut high_score = HighScore::load(MemoryStore::new());
/// assert_eq!(high_score.best(), 0);
///
/// assert!(high_score.submit(300).unwrap());
/// assert!(!high_score.submit(200).unwrap());
/// assert_eq!(high_score.best(), 300);
/// ```
#[derive(Debug)]
pub struct HighScore<S> {
    store: S,
    best: u64,
}

impl<S> HighScore<S>
where
    S: KeyValueStore,
{
    /// Reads the stored best score. Missing or malformed values count as 0.
    pub fn load(store: S) -> Self {
        let best = store
            .get(HIGH_SCORE_KEY)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0);
        Self { store, best }
    }

    /// Returns the best score seen, whether or not it was persisted.
    #[must_use]
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Records `score` if it beats the best. Returns whether it did.
    pub fn submit(&mut self, score: u64) -> Result<bool, StoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        self.store.set(HIGH_SCORE_KEY, score.to_string())?;
        Ok(true)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
