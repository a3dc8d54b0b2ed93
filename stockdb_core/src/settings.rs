// stockdb_core/src/settings.rs

//! Configuration for the query tool.
//! Loads settings from an optional JSON file and validates them.
//!
//! Example `settings.json`:
//! {
//!   "data_path": "data/new.csv",
//!   "log_level": "info",
//!   "limits": { "top_volume": 10, "bottom_close": 5, "top_dividends": 5 }
//! }
//!
//! Every field may be omitted.

use crate::query;

const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

/// Top-level settings structure.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    pub data_path: String,
    pub log_level: String,
    pub limits: query::SelectionLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: "data/new.csv".to_string(),
            log_level: "info".to_string(),
            limits: query::SelectionLimits::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file.
    /// # Arguments
    /// * `settings_file_path` - Path to the JSON configuration file.
    /// # Returns
    /// * `anyhow::Result<Settings>` containing the loaded settings.
    pub fn load<P: AsRef<std::path::Path>>(settings_file_path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(settings_file_path)?;
        Self::from_json(&contents)
    }

    /// Parses and validates settings from a JSON string.
    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings JSON: {}", e))?;

        check_args(&settings)
            .map_err(|e| anyhow::anyhow!("Settings validation failed:\n{}", e))?;

        anyhow::Ok(settings)
    }
}

fn check_args(settings: &Settings) -> anyhow::Result<()> {
    // check data_path
    {
        if settings.data_path.trim().is_empty() {
            anyhow::bail!("'data_path' cannot be empty");
        }
    }

    // check log_level
    {
        if !VALID_LOG_LEVELS.contains(&settings.log_level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid 'log_level' '{}'. Valid levels are: {:?}",
                settings.log_level,
                VALID_LOG_LEVELS,
            );
        }
    }

    // check limits
    {
        let limits = &settings.limits;
        let named = [
            ("top_volume", limits.top_volume),
            ("bottom_close", limits.bottom_close),
            ("top_dividends", limits.top_dividends),
        ];
        for (name, value) in named {
            if value == 0 {
                anyhow::bail!("'limits.{}' must be positive, got {}", name, value);
            }
        }
    }

    anyhow::Ok(())
}
