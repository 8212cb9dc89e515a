use chrono::NaiveDate;

use crate::config::Config;
use crate::models::{Asset, AssetType, Operation, OperationType};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// An operation whose only interesting fields are date, asset and result.
pub fn op(day: &str, asset: &str, profit_loss: f64) -> Operation {
    Operation::new(date(day), asset, OperationType::Buy, 1.0, 1.0, 1.0).with_profit_loss(profit_loss)
}

/// Operations with the given results, all on the same date and asset.
pub fn ops_with_pnl(pnls: &[f64]) -> Vec<Operation> {
    pnls.iter().map(|&p| op("2025-04-01", "EURUSD", p)).collect()
}

pub fn assets(symbols: &[&str]) -> Vec<Asset> {
    symbols
        .iter()
        .enumerate()
        .map(|(i, s)| Asset::new(i as u64 + 1, s, s, AssetType::Forex))
        .collect()
}

/// A Config suitable for testing: calendar-date weekdays, permissive assets,
/// no seed data and a per-process temp data dir.
pub fn default_test_config() -> Config {
    Config {
        data_dir: std::env::temp_dir()
            .join(format!("trading_journal_test_{}", std::process::id()))
            .to_string_lossy()
            .to_string(),
        namespace: "trading-storage".to_string(),
        weekday_timezone: None,
        strict_assets: false,
        seed_sample_data: false,
        log_level: "ERROR".to_string(),
    }
}
