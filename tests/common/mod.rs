use chrono::NaiveDate;
use trading_journal::models::{Asset, AssetType, Operation, OperationType};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// An operation recorded with a broker-reported result.
pub fn op(day: &str, asset: &str, profit_loss: f64) -> Operation {
    Operation::new(date(day), asset, OperationType::Buy, 1.0, 1.0, 1.0).with_profit_loss(profit_loss)
}

pub fn forex(symbols: &[&str]) -> Vec<Asset> {
    symbols
        .iter()
        .enumerate()
        .map(|(i, s)| Asset::new(i as u64 + 1, s, s, AssetType::Forex))
        .collect()
}

/// Two weeks of mixed trades across four symbols, one of them unlisted.
pub fn april_history() -> Vec<Operation> {
    vec![
        op("2025-04-01", "EURUSD", 30.0),
        op("2025-04-01", "GBPUSD", -10.0),
        op("2025-04-02", "GBPUSD", 30.0),
        op("2025-04-03", "EURUSD", -5.0),
        op("2025-04-04", "XAUUSD", 100.0),
        op("2025-04-05", "EURUSD", -20.0),
        op("2025-04-07", "XAUUSD", 0.0),
        op("2025-04-08", "DOGEUSD", 12.5),
        op("2025-04-11", "GBPUSD", 50.0),
        op("2025-04-12", "EURUSD", -40.0),
    ]
}
