//! Device-level preferences
//!
//! The session core keeps a single plain flag here: whether the app has ever
//! launched on this device. The flag is set on first run and never reset, and
//! is used to discard vault tokens restored onto a fresh install.

use crate::kv::{KvStore, Result};

/// Fixed key for the first-launch flag.
const HAS_LAUNCHED_KEY: &str = "device:hasLaunchedBefore";

/// Device preference store
#[derive(Clone)]
pub struct Prefs {
    kv: KvStore,
}

impl Prefs {
    /// Create a preference store over a key-value backend
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Whether the app has launched on this device before
    pub fn has_launched_before(&self) -> Result<bool> {
        Ok(self.kv.get::<bool>(HAS_LAUNCHED_KEY)?.unwrap_or(false))
    }

    /// Record that the first launch has happened
    pub fn mark_launched(&self) -> Result<()> {
        self.kv.set(HAS_LAUNCHED_KEY, &true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_to_false() {
        let prefs = Prefs::new(KvStore::in_memory().unwrap());
        assert!(!prefs.has_launched_before().unwrap());
    }

    #[test]
    fn test_mark_launched() {
        let prefs = Prefs::new(KvStore::in_memory().unwrap());

        prefs.mark_launched().unwrap();
        assert!(prefs.has_launched_before().unwrap());

        // Never reset; marking again is a no-op
        prefs.mark_launched().unwrap();
        assert!(prefs.has_launched_before().unwrap());
    }
}
