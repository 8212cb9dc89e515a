use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analytics::{AnalyticsOptions, AssetMatching, WeekdayBasis};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Storage
    pub data_dir: String,
    pub namespace: String,

    // Analytics
    /// IANA zone used to re-read dates for weekday bucketing; `None` buckets
    /// by the recorded calendar date.
    pub weekday_timezone: Option<String>,
    pub strict_assets: bool,

    // Store bootstrap
    pub seed_sample_data: bool,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let weekday_timezone = std::env::var("WEEKDAY_TIMEZONE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Config {
            data_dir: env("JOURNAL_DATA_DIR", "data"),
            namespace: env("JOURNAL_NAMESPACE", "trading-storage"),
            weekday_timezone,
            strict_assets: env("STRICT_ASSETS", "false").to_lowercase() == "true",
            seed_sample_data: env("SEED_SAMPLE_DATA", "true").to_lowercase() == "true",
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }

    /// File that holds the persisted store state.
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(format!("{}.json", self.namespace))
    }

    /// Analytics switches derived from the config. An unknown zone name falls
    /// back to calendar-date bucketing.
    pub fn analytics_options(&self) -> AnalyticsOptions {
        let weekday_basis = match self.weekday_timezone.as_deref() {
            Some(name) => match name.parse::<Tz>() {
                Ok(tz) => WeekdayBasis::Zoned(tz),
                Err(_) => {
                    tracing::warn!("unknown WEEKDAY_TIMEZONE '{}', using calendar dates", name);
                    WeekdayBasis::CalendarDate
                }
            },
            None => WeekdayBasis::CalendarDate,
        };

        AnalyticsOptions {
            weekday_basis,
            asset_matching: if self.strict_assets {
                AssetMatching::Strict
            } else {
                AssetMatching::Permissive
            },
        }
    }
}
