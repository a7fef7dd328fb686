//! Port interface for key/value variable sources

use std::collections::{BTreeMap, HashMap};

/// Trait for read-only string-to-string variable sources
///
/// A source is immutable by contract: the accessor never writes through it.
/// Implementations backed by live host state may still observe external
/// mutation between calls; the accessor performs no caching of values, so
/// every lookup reflects the source at call time.
pub trait VarSource: Send + Sync {
    /// Look up the value for a key
    ///
    /// Returns the stored value even when it is the empty string.
    fn get(&self, key: &str) -> Option<String>;

    /// Presence test only
    ///
    /// An empty-string value still counts as present.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl VarSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl VarSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}
