//! Accessor service - layered lookup over a variable source

use std::sync::Arc;

use envarc_domain::{format_key_set, EnvError, Result};
use once_cell::sync::OnceCell;

use super::ports::VarSource;
use super::views::{ExistingVars, RequiredVars};

/// Failure handler invoked when a required lookup cannot be satisfied
///
/// The handler receives the offending key, or the bracketed list of every
/// attempted key for multi-key lookups, and produces the error value the
/// operation returns. Handlers are injected per accessor instance; the
/// missing-handler is only ever invoked for absence and the empty-handler
/// only for present-but-empty values, so the two failure kinds stay
/// distinguishable no matter how a host customizes them.
pub type FailureHandler = Arc<dyn Fn(&str) -> EnvError + Send + Sync>;

fn default_on_missing() -> FailureHandler {
    Arc::new(|key: &str| EnvError::key_not_found(key))
}

fn default_on_empty() -> FailureHandler {
    Arc::new(|key: &str| EnvError::empty_value(key))
}

/// Accessor over a string-to-string variable source
///
/// Wraps a [`VarSource`] and exposes read operations with layered
/// fallback and fail-fast behavior. `get`/`has`/`first` are total and never
/// fail; `require`/`require_first` and the two views fail fast, matching the
/// pattern "either a usable value exists or the process should not start".
///
/// Every read is a pure function of the source contents and the arguments at
/// call time. The accessor holds no value cache, so a live source that is
/// mutated externally is observed on the next call. The only memoized state
/// is the two lazy views, which are computed once per accessor.
pub struct EnvAccessor {
    source: Arc<dyn VarSource>,
    on_missing: FailureHandler,
    on_empty: FailureHandler,
    exists: OnceCell<ExistingVars>,
    required: OnceCell<RequiredVars>,
}

impl EnvAccessor {
    /// Create an accessor with the default failure handlers
    pub fn new(source: Arc<dyn VarSource>) -> Self {
        Self::builder(source).build()
    }

    /// Start building an accessor with custom failure handlers
    pub fn builder(source: Arc<dyn VarSource>) -> EnvAccessorBuilder {
        EnvAccessorBuilder::new(source)
    }

    /// Retrieve a variable without checking for its presence
    ///
    /// Returns the value if the key is present, even when it is the empty
    /// string. `None` is the single sentinel for absence.
    pub fn get(&self, key: &str) -> Option<String> {
        self.source.get(key)
    }

    /// Retrieve a variable, falling back to a stringified default
    ///
    /// Non-string defaults (numbers, booleans) go through [`ToString`], so
    /// `get_or("PORT", 8080)` yields `"8080"` when `PORT` is unset. A
    /// present-but-empty value is returned as-is, not replaced.
    pub fn get_or(&self, key: &str, default: impl ToString) -> String {
        self.source.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Determine whether a variable exists
    ///
    /// Presence test only; an empty-string value still counts as present.
    pub fn has(&self, key: &str) -> bool {
        self.source.contains(key)
    }

    /// Retrieve the value of the first present key in `keys`
    ///
    /// Scans left to right and returns the first present key's value, even
    /// when it is the empty string. `Ok(None)` when no key is present.
    ///
    /// # Errors
    /// Returns `EnvError::InvalidInput` if `keys` is empty. This is a
    /// caller-contract violation, not a missing-variable condition.
    pub fn first(&self, keys: &[&str]) -> Result<Option<String>> {
        Ok(self.scan(keys)?.map(|(_, value)| value))
    }

    /// Like [`first`](Self::first), falling back to a stringified default
    ///
    /// # Errors
    /// Returns `EnvError::InvalidInput` if `keys` is empty.
    pub fn first_or(&self, keys: &[&str], default: impl ToString) -> Result<String> {
        Ok(self.first(keys)?.unwrap_or_else(|| default.to_string()))
    }

    /// Retrieve a variable, failing when it is absent or empty
    ///
    /// # Errors
    /// Returns the missing-handler's error (`EnvError::KeyNotFound` by
    /// default) when the key is absent, and the empty-handler's error
    /// (`EnvError::EmptyValue` by default) when it is present but holds the
    /// empty string.
    pub fn require(&self, key: &str) -> Result<String> {
        match self.source.get(key) {
            None => Err((self.on_missing)(key)),
            Some(value) if value.is_empty() => Err((self.on_empty)(key)),
            Some(value) => Ok(value),
        }
    }

    /// Retrieve the first present key in `keys`, failing when none qualifies
    ///
    /// # Errors
    /// Returns `EnvError::InvalidInput` if `keys` is empty; the
    /// missing-handler's error reporting the whole attempted set when no key
    /// is present; the empty-handler's error for the first present key when
    /// its value is the empty string.
    pub fn require_first(&self, keys: &[&str]) -> Result<String> {
        match self.scan(keys)? {
            Some((key, value)) if value.is_empty() => Err((self.on_empty)(key)),
            Some((_, value)) => Ok(value),
            None => Err((self.on_missing)(&format_key_set(keys))),
        }
    }

    /// Fail-fast view over present variables
    ///
    /// Computed on first access and cached for the accessor's lifetime;
    /// repeated calls return the same view.
    pub fn exists(&self) -> &ExistingVars {
        self.exists.get_or_init(|| {
            ExistingVars::new(Arc::clone(&self.source), Arc::clone(&self.on_missing))
        })
    }

    /// Fail-fast view over present, non-empty variables
    ///
    /// Computed on first access and cached for the accessor's lifetime.
    pub fn required(&self) -> &RequiredVars {
        self.required.get_or_init(|| {
            RequiredVars::new(
                Arc::clone(&self.source),
                Arc::clone(&self.on_missing),
                Arc::clone(&self.on_empty),
            )
        })
    }

    /// Scan `keys` in order for the first present one
    fn scan<'k>(&self, keys: &[&'k str]) -> Result<Option<(&'k str, String)>> {
        if keys.is_empty() {
            return Err(EnvError::invalid_input("at least one variable name must be provided"));
        }

        for key in keys {
            if let Some(value) = self.source.get(key) {
                return Ok(Some((*key, value)));
            }
        }

        Ok(None)
    }
}

/// Builder for [`EnvAccessor`] with custom failure handlers
///
/// Handlers may rephrase messages or substitute a different error kind, but
/// the accessor preserves the not-found vs. empty distinction structurally:
/// each handler is only invoked for its own condition.
pub struct EnvAccessorBuilder {
    source: Arc<dyn VarSource>,
    on_missing: FailureHandler,
    on_empty: FailureHandler,
}

impl EnvAccessorBuilder {
    fn new(source: Arc<dyn VarSource>) -> Self {
        Self { source, on_missing: default_on_missing(), on_empty: default_on_empty() }
    }

    /// Replace the handler invoked when a required key is absent
    #[must_use]
    pub fn on_missing(mut self, handler: impl Fn(&str) -> EnvError + Send + Sync + 'static) -> Self {
        self.on_missing = Arc::new(handler);
        self
    }

    /// Replace the handler invoked when a required value is the empty string
    #[must_use]
    pub fn on_empty(mut self, handler: impl Fn(&str) -> EnvError + Send + Sync + 'static) -> Self {
        self.on_empty = Arc::new(handler);
        self
    }

    /// Finish building the accessor
    pub fn build(self) -> EnvAccessor {
        EnvAccessor {
            source: self.source,
            on_missing: self.on_missing,
            on_empty: self.on_empty,
            exists: OnceCell::new(),
            required: OnceCell::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn accessor(pairs: &[(&str, &str)]) -> EnvAccessor {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        EnvAccessor::new(Arc::new(map))
    }

    #[test]
    fn test_get_returns_value_when_present() {
        let env = accessor(&[("USERNAME", "alice")]);
        assert_eq!(env.get("USERNAME"), Some("alice".to_string()));
    }

    #[test]
    fn test_get_returns_none_when_absent() {
        let env = accessor(&[("USERNAME", "alice")]);
        assert_eq!(env.get("PASSWORD"), None);
    }

    #[test]
    fn test_get_returns_empty_value_as_is() {
        let env = accessor(&[("OTHER", "")]);
        assert_eq!(env.get("OTHER"), Some(String::new()));
    }

    #[test]
    fn test_get_or_stringifies_non_string_defaults() {
        let env = accessor(&[("USERNAME", "alice")]);
        assert_eq!(env.get_or("PASSWORD", 123), "123");
        assert_eq!(env.get_or("PASSWORD", true), "true");
        assert_eq!(env.get_or("PASSWORD", "fallback"), "fallback");
    }

    #[test]
    fn test_get_or_prefers_present_value_over_default() {
        let env = accessor(&[("USERNAME", "alice"), ("EMPTY", "")]);
        assert_eq!(env.get_or("USERNAME", "other"), "alice");
        // A present-but-empty value is still the value, not the default.
        assert_eq!(env.get_or("EMPTY", "other"), "");
    }

    #[test]
    fn test_has_is_presence_only() {
        let env = accessor(&[("USERNAME", "alice"), ("EMPTY", "")]);
        assert!(env.has("USERNAME"));
        assert!(env.has("EMPTY"));
        assert!(!env.has("PASSWORD"));
    }

    #[test]
    fn test_first_returns_earliest_present_key() {
        let env = accessor(&[("A", "1"), ("B", "2")]);
        assert_eq!(env.first(&["X", "B", "A"]).unwrap(), Some("2".to_string()));
        assert_eq!(env.first(&["A", "B"]).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_first_returns_none_when_no_key_present() {
        let env = accessor(&[("A", "1")]);
        assert_eq!(env.first(&["X", "Y"]).unwrap(), None);
    }

    #[test]
    fn test_first_accepts_single_key() {
        let env = accessor(&[("A", "1")]);
        assert_eq!(env.first(&["A"]).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_first_rejects_empty_key_list() {
        let env = accessor(&[("A", "1")]);
        let err = env.first(&[]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_first_returns_empty_string_when_first_present_key_is_empty() {
        let env = accessor(&[("EMPTY", ""), ("FULL", "value")]);
        assert_eq!(env.first(&["EMPTY", "FULL"]).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_first_or_falls_back_to_stringified_default() {
        let env = accessor(&[("A", "1")]);
        assert_eq!(env.first_or(&["X", "Y"], 123).unwrap(), "123");
        assert_eq!(env.first_or(&["X", "A"], 123).unwrap(), "1");
    }

    #[test]
    fn test_require_returns_non_empty_value() {
        let env = accessor(&[("USERNAME", "alice")]);
        assert_eq!(env.require("USERNAME").unwrap(), "alice");
    }

    #[test]
    fn test_require_fails_not_found_for_absent_key() {
        let env = accessor(&[("USERNAME", "alice")]);
        let err = env.require("PASSWORD").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("PASSWORD"));
    }

    #[test]
    fn test_require_fails_empty_value_for_blank_key() {
        let env = accessor(&[("OTHER", "")]);
        let err = env.require("OTHER").unwrap_err();
        assert!(err.is_empty_value());
        assert!(err.to_string().contains("OTHER"));
    }

    #[test]
    fn test_require_first_returns_earliest_present_key() {
        let env = accessor(&[("A", "1"), ("B", "2")]);
        assert_eq!(env.require_first(&["X", "B", "A"]).unwrap(), "2");
    }

    #[test]
    fn test_require_first_reports_whole_key_set_when_none_present() {
        let env = accessor(&[("A", "1")]);
        let err = env.require_first(&["X", "Y"]).unwrap_err();
        assert!(err.is_not_found());
        let msg = err.to_string();
        assert!(msg.contains("X"));
        assert!(msg.contains("Y"));
    }

    #[test]
    fn test_require_first_fails_empty_value_for_first_present_key() {
        let env = accessor(&[("EMPTY", ""), ("FULL", "value")]);
        let err = env.require_first(&["EMPTY", "FULL"]).unwrap_err();
        assert!(err.is_empty_value());
        assert!(err.to_string().contains("EMPTY"));
    }

    #[test]
    fn test_require_first_rejects_empty_key_list() {
        let env = accessor(&[("A", "1")]);
        assert!(env.require_first(&[]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_reads_are_idempotent_against_unchanged_source() {
        let env = accessor(&[("A", "1"), ("B", "2")]);
        for _ in 0..3 {
            assert_eq!(env.get("A"), Some("1".to_string()));
            assert!(env.has("B"));
            assert_eq!(env.first(&["X", "B"]).unwrap(), Some("2".to_string()));
            assert_eq!(env.require("A").unwrap(), "1");
        }
    }

    #[test]
    fn test_views_are_memoized_per_accessor() {
        let env = accessor(&[("A", "1")]);
        assert!(std::ptr::eq(env.exists(), env.exists()));
        assert!(std::ptr::eq(env.required(), env.required()));
    }

    #[test]
    fn test_custom_missing_handler_is_used_for_absence_only() {
        let map: HashMap<String, String> =
            [("EMPTY".to_string(), String::new())].into_iter().collect();
        let env = EnvAccessor::builder(Arc::new(map))
            .on_missing(|key| EnvError::key_not_found(format!("custom:{key}")))
            .build();

        let err = env.require("GONE").unwrap_err();
        assert_eq!(err, EnvError::key_not_found("custom:GONE"));

        // The empty condition still routes through the default empty handler.
        let err = env.require("EMPTY").unwrap_err();
        assert!(err.is_empty_value());
    }

    #[test]
    fn test_custom_empty_handler_is_used_for_emptiness_only() {
        let map: HashMap<String, String> =
            [("EMPTY".to_string(), String::new())].into_iter().collect();
        let env = EnvAccessor::builder(Arc::new(map))
            .on_empty(|key| EnvError::empty_value(format!("custom:{key}")))
            .build();

        let err = env.require("EMPTY").unwrap_err();
        assert_eq!(err, EnvError::empty_value("custom:EMPTY"));

        let err = env.require("GONE").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_custom_handler_receives_key_set_for_multi_key_miss() {
        let env = EnvAccessor::builder(Arc::new(HashMap::<String, String>::new()))
            .on_missing(|keys| EnvError::key_not_found(keys.to_uppercase()))
            .build();

        let err = env.require_first(&["a", "b"]).unwrap_err();
        assert_eq!(err, EnvError::key_not_found("[A, B]"));
    }
}
