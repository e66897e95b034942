//! Tracker file I/O.
//!
//! A tracker file is a pretty-printed JSON array of milestones. This module
//! provides:
//!
//! - [`types`]: serializable types that mirror the on-disk schema
//! - [`serialization`]: atomic save and validated load functions

pub mod serialization;
pub mod types;

pub use serialization::{load, load_or_seed, save, Fallback, LoadOutcome};
