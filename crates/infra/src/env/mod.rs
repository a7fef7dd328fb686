//! Process environment adapters

pub mod bootstrap;
pub mod process;

pub use bootstrap::*;
pub use process::*;
