//! Milestone roll-up engine.
//!
//! - [`rollup`]: completion derivation and value clamping
//! - [`seed`]: default milestone set
//!
//! Mutations of the milestone tree live in [`crate::commands`]; each one
//! ends by calling [`rollup::recalculate_all`] through
//! [`crate::state::Tracker::commit`].

pub mod rollup;
pub mod seed;

pub use seed::default_milestones;
