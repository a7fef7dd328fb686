//! # EnvArc Infra
//!
//! Host adapters for EnvArc.
//!
//! This crate contains:
//! - The live process environment source
//! - The ambient-source factory and snapshot helper
//! - The `.env` bootstrap
//!
//! ## Architecture
//! - Depends on `envarc-domain` and `envarc-core`
//! - All process and filesystem access lives here; the core stays pure

pub mod env;

// Re-export commonly used items
pub use env::bootstrap::{load_dotenv, load_dotenv_from};
pub use env::process::{ambient, ambient_accessor, snapshot, ProcessEnv};
