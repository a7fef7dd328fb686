//! Fail-fast views over a variable source
//!
//! Explicit capability objects replacing transparent attribute interception:
//! client code calls `get_or_fail(key)` where it previously indexed the view
//! directly. Views are materialized once per accessor and stay referentially
//! stable for its lifetime.

use std::sync::Arc;

use envarc_domain::Result;

use super::ports::VarSource;
use super::service::FailureHandler;

/// Read-only view that fails on access to an absent variable
///
/// Indexing a present key returns its value even when it is the empty
/// string; emptiness is enforced only by [`RequiredVars`].
pub struct ExistingVars {
    source: Arc<dyn VarSource>,
    on_missing: FailureHandler,
}

impl ExistingVars {
    pub(crate) fn new(source: Arc<dyn VarSource>, on_missing: FailureHandler) -> Self {
        Self { source, on_missing }
    }

    /// Retrieve a variable, failing when it is absent
    ///
    /// # Errors
    /// Returns the accessor's missing-handler error (`EnvError::KeyNotFound`
    /// by default) when the key is not present in the source.
    pub fn get_or_fail(&self, key: &str) -> Result<String> {
        self.source.get(key).ok_or_else(|| (self.on_missing)(key))
    }
}

/// Read-only view that fails on access to an absent or empty variable
pub struct RequiredVars {
    source: Arc<dyn VarSource>,
    on_missing: FailureHandler,
    on_empty: FailureHandler,
}

impl RequiredVars {
    pub(crate) fn new(
        source: Arc<dyn VarSource>,
        on_missing: FailureHandler,
        on_empty: FailureHandler,
    ) -> Self {
        Self { source, on_missing, on_empty }
    }

    /// Retrieve a variable, failing when it is absent or the empty string
    ///
    /// # Errors
    /// Returns the missing-handler's error when the key is absent and the
    /// empty-handler's error when the value is the empty string.
    pub fn get_or_fail(&self, key: &str) -> Result<String> {
        match self.source.get(key) {
            None => Err((self.on_missing)(key)),
            Some(value) if value.is_empty() => Err((self.on_empty)(key)),
            Some(value) => Ok(value),
        }
    }
}
