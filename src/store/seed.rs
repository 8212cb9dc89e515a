//! Reference assets and a small demo history used to bootstrap a new store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{Asset, AssetType, EmotionalState, JournalEntry, Operation, OperationType};

pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset::new(1, "EURUSD", "Euro / US Dollar", AssetType::Forex),
        Asset::new(2, "GBPUSD", "British Pound / US Dollar", AssetType::Forex),
        Asset::new(3, "USDJPY", "US Dollar / Japanese Yen", AssetType::Forex),
        Asset::new(4, "AUDUSD", "Australian Dollar / US Dollar", AssetType::Forex),
        Asset::new(5, "USDCAD", "US Dollar / Canadian Dollar", AssetType::Forex),
        Asset::new(6, "BTCUSD", "Bitcoin / US Dollar", AssetType::Crypto),
        Asset::new(7, "ETHUSD", "Ethereum / US Dollar", AssetType::Crypto),
        Asset::new(8, "XAUUSD", "Gold / US Dollar", AssetType::Commodity),
        Asset::new(9, "SPX500", "S&P 500", AssetType::Index),
        Asset::new(10, "NASDAQ", "NASDAQ", AssetType::Index),
    ]
}

fn at(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Demo history. The broker-reported results deliberately differ from the
/// price identity for some rows, as imported data often does.
pub fn sample_operations() -> Vec<Operation> {
    let rows: [(u64, &str, &str, OperationType, f64, f64, f64, f64, &str); 10] = [
        (1, "2025-04-01", "EURUSD", OperationType::Buy, 1.0750, 1.0780, 0.1, 30.0, "2025-04-01T10:30:00"),
        (2, "2025-04-02", "GBPUSD", OperationType::Sell, 1.2650, 1.2620, 0.1, 30.0, "2025-04-02T14:15:00"),
        (3, "2025-04-03", "BTCUSD", OperationType::Buy, 65000.0, 64500.0, 0.01, -5.0, "2025-04-03T09:45:00"),
        (4, "2025-04-04", "XAUUSD", OperationType::Buy, 2300.0, 2320.0, 0.05, 100.0, "2025-04-04T11:20:00"),
        (5, "2025-04-05", "EURUSD", OperationType::Sell, 1.0780, 1.0800, 0.1, -20.0, "2025-04-05T15:30:00"),
        (6, "2025-04-08", "SPX500", OperationType::Buy, 5200.0, 5250.0, 0.02, 100.0, "2025-04-08T10:00:00"),
        (7, "2025-04-09", "USDJPY", OperationType::Sell, 151.50, 151.20, 0.1, 30.0, "2025-04-09T13:45:00"),
        (8, "2025-04-10", "ETHUSD", OperationType::Buy, 3500.0, 3550.0, 0.05, 2.5, "2025-04-10T16:20:00"),
        (9, "2025-04-11", "NASDAQ", OperationType::Sell, 18200.0, 18150.0, 0.01, 50.0, "2025-04-11T09:30:00"),
        (10, "2025-04-12", "AUDUSD", OperationType::Buy, 0.6650, 0.6630, 0.2, -40.0, "2025-04-12T11:15:00"),
    ];

    rows.iter()
        .filter_map(|&(id, date, asset, kind, entry, exit, volume, pnl, created)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let mut op = Operation::new(date, asset, kind, entry, exit, volume).with_profit_loss(pnl);
            op.id = Some(id);
            op.created_at = at(created);
            Some(op)
        })
        .collect()
}

pub fn sample_journal_entries() -> Vec<JournalEntry> {
    let rows = [
        (1, 1, EmotionalState::Calm, "Followed the trading plan", "Keep the discipline", "2025-04-01T18:30:00"),
        (2, 3, EmotionalState::Anxious, "Entered in a hurry without trend confirmation", "Wait for confirmation before entering", "2025-04-03T17:45:00"),
        (3, 5, EmotionalState::Frustrated, "Closed too early out of fear", "Work on patience and confidence", "2025-04-05T19:20:00"),
        (4, 10, EmotionalState::Impatient, "Did not wait for the proper entry signal", "Stick to the entry rules", "2025-04-12T18:00:00"),
    ];

    rows.iter()
        .map(|&(id, operation_id, state, description, improvements, created)| {
            let mut entry = JournalEntry::new(operation_id, state, description, improvements);
            entry.id = Some(id);
            entry.created_at = at(created);
            entry
        })
        .collect()
}
