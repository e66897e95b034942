use std::path::Path;

use super::ConfigError;

/// `[windows]`: biological time windows, in days.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WindowThresholds {
    /// Served females beyond this are overdue for farrowing.
    pub gestation_max_days: u32,
    pub lactation_max_days: u32,
    /// Weaning window everywhere except the special sites below.
    pub weaning_max_days_default: u32,
    /// Weaning window at `sites.alt_location`.
    pub weaning_max_days_alt_location: u32,
    /// Weaning window at `sites.line_b_location` for line-B animals.
    pub weaning_max_days_alt_location_line_b: u32,
}

impl Default for WindowThresholds {
    fn default() -> Self {
        Self {
            gestation_max_days: 114,
            lactation_max_days: 23,
            weaning_max_days_default: 5,
            weaning_max_days_alt_location: 5,
            weaning_max_days_alt_location_line_b: 7,
        }
    }
}

/// `[sites]`: facility names that carry their own weaning windows.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SiteRules {
    pub alt_location: String,
    pub line_b_location: String,
}

impl Default for SiteRules {
    fn default() -> Self {
        Self {
            alt_location: "facility A".to_string(),
            line_b_location: "facility B".to_string(),
        }
    }
}

/// `[genetics]`: genetic-line codes as they appear in the herd data.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneticCodes {
    pub line_a: String,
    pub line_b: String,
    /// Premium sub-line, always counted inside the line-A group.
    pub pure_subline: String,
}

impl Default for GeneticCodes {
    fn default() -> Self {
        Self {
            line_a: "LINE_A".to_string(),
            line_b: "LINE_B".to_string(),
            pure_subline: "PURE_SUBLINE".to_string(),
        }
    }
}

/// Site configuration for the breeding dashboard. Loaded from a TOML file;
/// every section and key may be omitted.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BreedingConfig {
    pub windows: WindowThresholds,
    pub sites: SiteRules,
    pub genetics: GeneticCodes,
}

/// Parse a TOML string into a [`BreedingConfig`], running validation.
pub fn parse(toml_str: &str) -> Result<BreedingConfig, ConfigError> {
    let cfg: BreedingConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Read and parse a configuration file.
pub fn load(path: &Path) -> Result<BreedingConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
    parse(&text)
}

fn validate(cfg: &BreedingConfig) -> Result<(), ConfigError> {
    let codes = [
        ("genetics.line_a", &cfg.genetics.line_a),
        ("genetics.line_b", &cfg.genetics.line_b),
        ("genetics.pure_subline", &cfg.genetics.pure_subline),
        ("sites.alt_location", &cfg.sites.alt_location),
        ("sites.line_b_location", &cfg.sites.line_b_location),
    ];
    for (key, value) in codes {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{key} must not be empty")));
        }
    }

    let genetics = [
        normalize(&cfg.genetics.line_a),
        normalize(&cfg.genetics.line_b),
        normalize(&cfg.genetics.pure_subline),
    ];
    if genetics[0] == genetics[1] || genetics[0] == genetics[2] || genetics[1] == genetics[2] {
        return Err(ConfigError::Invalid(
            "genetics.line_a, genetics.line_b and genetics.pure_subline must be distinct"
                .to_string(),
        ));
    }

    Ok(())
}

/// Trim + uppercase; the comparison key for every code and location.
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
