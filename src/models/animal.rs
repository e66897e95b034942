//! Breeding-herd record model.
//!
//! [`AnimalRecord`] is one row of a herd status snapshot: one animal, its
//! current reproductive [`StatusCode`] and how long it has been in it.
//! Records are produced by [`crate::dataset`] and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// One-letter reproductive status of a breeding female.
///
/// Declaration order is the fixed display order used by the status chart
/// (`S, L, W, H, N, A`), so the derived `Ord` can key ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCode {
    /// Served, gestation in progress.
    #[serde(rename = "S")]
    Served,
    /// Lactating.
    #[serde(rename = "L")]
    Lactating,
    /// Weaned, waiting for the next service.
    #[serde(rename = "W")]
    Weaned,
    /// In heat but not served.
    #[serde(rename = "H")]
    HeatNotServed,
    /// Not pregnant after service (service failure).
    #[serde(rename = "N")]
    NotPregnant,
    /// Aborted.
    #[serde(rename = "A")]
    Aborted,
}

/// Display severity of a status, used for badge colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Productive,
    Warning,
    Critical,
}

impl StatusCode {
    /// All codes in chart order.
    pub const ALL: [StatusCode; 6] = [
        StatusCode::Served,
        StatusCode::Lactating,
        StatusCode::Weaned,
        StatusCode::HeatNotServed,
        StatusCode::NotPregnant,
        StatusCode::Aborted,
    ];

    /// Parse a raw status cell. Whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "S" => Some(Self::Served),
            "L" => Some(Self::Lactating),
            "W" => Some(Self::Weaned),
            "H" => Some(Self::HeatNotServed),
            "N" => Some(Self::NotPregnant),
            "A" => Some(Self::Aborted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Served => "S",
            Self::Lactating => "L",
            Self::Weaned => "W",
            Self::HeatNotServed => "H",
            Self::NotPregnant => "N",
            Self::Aborted => "A",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Served => "Served",
            Self::Lactating => "Lactating",
            Self::Weaned => "Weaned",
            Self::HeatNotServed => "Heat not served",
            Self::NotPregnant => "Not pregnant (service failure)",
            Self::Aborted => "Aborted",
        }
    }

    /// `S`, `L` and `W` are the productive states.
    pub fn is_productive(self) -> bool {
        matches!(self, Self::Served | Self::Lactating | Self::Weaned)
    }

    /// `H`, `N` and `A` are the problem states that feed the red list.
    pub fn is_problem(self) -> bool {
        !self.is_productive()
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Served | Self::Lactating | Self::Weaned => Severity::Productive,
            Self::HeatNotServed | Self::NotPregnant => Severity::Warning,
            Self::Aborted => Severity::Critical,
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One animal in a herd status snapshot.
///
/// Text fields are stored trimmed but otherwise as read; comparisons against
/// filter values and configured codes are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub code: String,
    pub status: StatusCode,
    /// Days elapsed in the current status.
    pub days_in_process: u32,
    /// Number of farrowings so far.
    pub parities: u32,
    pub location: String,
    pub genetic_line: String,
    pub group: String,
}
