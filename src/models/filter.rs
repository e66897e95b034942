//! Filter selection applied to the herd before aggregation.
//!
//! A [`FilterSelection`] is transient UI state: it lives in
//! [`crate::state::Herd`] next to the dataset and is never persisted with
//! the records. Raw UI strings are resolved into these types by
//! [`crate::breeding::filter::resolve`].

use serde::{Deserialize, Serialize};

/// One filter dimension.
///
/// `Invalid` keeps the raw text of a value that could not be coerced into
/// `T`; it matches no record instead of raising an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
    Invalid(String),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

/// Genetic-line filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum GeneticFilter {
    #[default]
    All,
    /// Line A together with its premium pure sub-line.
    LineAGroup,
    LineB,
    PureSublineOnly,
    /// Unrecognised filter code; matches nothing.
    Unknown(String),
}

/// Complete filter state for the breeding dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub location: Selection<String>,
    pub genetic: GeneticFilter,
    pub parities: Selection<u32>,
}
