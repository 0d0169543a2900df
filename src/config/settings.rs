//! User settings for Tally
//!
//! Display preferences, report windows and the fallback category labels.
//! Every field has a serde default so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::reports::SummaryOptions;
use crate::storage::file_io::write_json_atomic;

/// User settings for Tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format, display only)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Months shown in the monthly series
    #[serde(default = "default_trailing_months")]
    pub trailing_months: usize,

    /// Months averaged for the rolling net
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,

    /// Label for expenses recorded without a category
    #[serde(default = "default_catch_all_category")]
    pub catch_all_category: String,

    /// Label given to income entries recorded without a category
    #[serde(default = "default_income_category")]
    pub income_category: String,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_trailing_months() -> usize {
    12
}

fn default_rolling_window() -> usize {
    3
}

fn default_catch_all_category() -> String {
    "other".to_string()
}

fn default_income_category() -> String {
    "income".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            trailing_months: default_trailing_months(),
            rolling_window: default_rolling_window(),
            catch_all_category: default_catch_all_category(),
            income_category: default_income_category(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TallyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Report options derived from these settings
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            trailing_months: self.trailing_months,
            rolling_window: self.rolling_window,
            catch_all_category: self.catch_all_category.clone(),
        }
    }
}
