//! Live process environment source
//!
//! The default ambient source for an embedding application. Source selection
//! stays a single narrow adapter here; the core accessor only ever sees the
//! `VarSource` trait.

use std::collections::HashMap;
use std::sync::Arc;

use envarc_core::{EnvAccessor, VarSource};

/// `VarSource` over the live process environment
///
/// Reads hit the host table on every call, so mutations of the process
/// environment made after construction are observed by the next lookup.
/// Values that are not valid Unicode are treated as absent, consistently
/// for both `get` and `contains`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Create a new process environment source
    pub fn new() -> Self {
        Self
    }
}

impl VarSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn contains(&self, key: &str) -> bool {
        std::env::var(key).is_ok()
    }
}

/// Obtain the default ambient variable source for this host
///
/// The embedding application calls this once at startup and injects the
/// result into [`EnvAccessor::new`] (or uses [`ambient_accessor`] directly).
pub fn ambient() -> Arc<dyn VarSource> {
    tracing::debug!("using live process environment as variable source");
    Arc::new(ProcessEnv::new())
}

/// Accessor over the ambient process environment with default handlers
pub fn ambient_accessor() -> EnvAccessor {
    EnvAccessor::new(ambient())
}

/// Point-in-time copy of the process environment
///
/// For callers who want a frozen source instead of the live table. Pairs
/// whose name or value is not valid Unicode are skipped.
pub fn snapshot() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
