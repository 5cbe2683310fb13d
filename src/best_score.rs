//! Best score bridge
//!
//! One decimal integer per cartridge, written through to the store the moment
//! the running score beats it.

use crate::consts::MAX_SCORE;
use crate::persistence::ScoreStore;

/// Store key for this cartridge
pub const BEST_SCORE_KEY: &str = "gb_best_galattica_v1";

/// Cached best score plus the key it lives under
#[derive(Debug, Clone)]
pub struct BestScore {
    key: String,
    value: u32,
}

impl BestScore {
    /// Read the best score from `store`; absent or malformed values read as 0
    pub fn load<S: ScoreStore + ?Sized>(store: &S, key: &str) -> Self {
        let value = parse_best(store.get(key).as_deref());
        log::info!("Best score for {}: {}", key, value);
        Self {
            key: key.to_string(),
            value,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write `score` through to the store if it beats the cached best.
    /// Returns true when a new best was recorded. Store failures are logged
    /// and do not interrupt play.
    pub fn record<S: ScoreStore + ?Sized>(&mut self, store: &mut S, score: u32) -> bool {
        let score = score.min(MAX_SCORE);
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = store.set(&self.key, &score.to_string()) {
            log::warn!("Failed to save best score {}: {}", score, e);
        }
        true
    }
}

/// Parse a stored best score. Anything that is not a plain non-negative
/// integer reads as 0.
pub fn parse_best(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .map(|v| v.min(MAX_SCORE))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_parse_best() {
        assert_eq!(parse_best(None), 0);
        assert_eq!(parse_best(Some("")), 0);
        assert_eq!(parse_best(Some("abc")), 0);
        assert_eq!(parse_best(Some("-5")), 0);
        assert_eq!(parse_best(Some(" 123 ")), 123);
        assert_eq!(parse_best(Some("5000")), MAX_SCORE);
    }

    #[test]
    fn test_record_writes_through() {
        let mut store = MemoryStore::with_entry(BEST_SCORE_KEY, "40");
        let mut best = BestScore::load(&store, BEST_SCORE_KEY);
        assert_eq!(best.value(), 40);

        assert!(!best.record(&mut store, 30));
        assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("40"));

        assert!(best.record(&mut store, 41));
        assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("41"));
        assert!(!best.record(&mut store, 41));
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            Some("garbage".to_string())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_broken_store_does_not_interrupt() {
        let mut store = BrokenStore;
        let mut best = BestScore::load(&store, BEST_SCORE_KEY);
        assert_eq!(best.value(), 0);
        assert!(best.record(&mut store, 12));
        assert_eq!(best.value(), 12);
    }
}
