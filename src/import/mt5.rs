//! MetaTrader 5 history export (CSV) to operations.
//!
//! Column layout: 0 time, 1 symbol, 2 type, 3 volume, 4 price, 5 S/L, 6 T/P,
//! 7 profit. The export carries no exit price, so it is recomputed from the
//! entry price, volume and reported profit. Profit is in account currency,
//! so for small lots the implied price can go to zero or below; such rows keep
//! the entry price as exit and the reported profit as is.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ImportError;
use crate::models::{Operation, OperationType};

const REQUIRED_HEADERS: &[&str] = &["Time", "Symbol", "Type", "Volume", "Price", "S / L", "T / P", "Profit"];
const MIN_COLUMNS: usize = 8;

const DATETIME_FORMATS: &[&str] = &[
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y.%m.%d", "%Y-%m-%d"];

pub fn parse_report(text: &str) -> Result<Vec<Operation>, ImportError> {
    if text.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(ImportError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ImportError::Empty),
    };
    let looks_like_mt5 = REQUIRED_HEADERS
        .iter()
        .any(|required| header.iter().any(|h| h.contains(required)));
    if !looks_like_mt5 {
        return Err(ImportError::NotMt5Report);
    }

    let mut operations = Vec::new();
    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        if record.len() < MIN_COLUMNS {
            debug!(line, "skipping short row");
            continue;
        }

        operations.push(parse_row(&record, line)?);
    }

    info!("Parsed {} operation(s) from MT5 report", operations.len());
    Ok(operations)
}

pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<Operation>, ImportError> {
    let text = std::fs::read_to_string(path)?;
    parse_report(&text)
}

fn parse_row(record: &csv::StringRecord, line: usize) -> Result<Operation, ImportError> {
    let invalid = |reason: String| ImportError::InvalidRow { line, reason };

    let date = parse_date(&record[0]).ok_or_else(|| invalid(format!("bad time '{}'", &record[0])))?;

    let symbol = &record[1];
    if symbol.is_empty() {
        return Err(invalid("missing symbol".to_string()));
    }

    let operation_type = if record[2].to_lowercase().contains("buy") {
        OperationType::Buy
    } else {
        OperationType::Sell
    };

    let number = |idx: usize, name: &str| -> Result<f64, ImportError> {
        record[idx]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(format!("bad {name} '{}'", &record[idx])))
    };
    let volume = number(3, "volume")?;
    let entry_price = number(4, "price")?;
    let profit = number(7, "profit")?;

    if volume <= 0.0 {
        return Err(invalid(format!("volume must be positive, got {volume}")));
    }
    if entry_price <= 0.0 {
        return Err(invalid(format!("price must be positive, got {entry_price}")));
    }

    let implied = operation_type.implied_exit_price(entry_price, profit, volume);
    let exit_price = if implied.is_finite() && implied > 0.0 {
        implied
    } else {
        debug!(line, implied, "implied exit price not positive, using entry price");
        entry_price
    };

    Ok(Operation {
        id: None,
        date,
        asset: symbol.to_string(),
        operation_type,
        entry_price,
        exit_price,
        volume,
        profit_loss: profit,
        created_at: None,
    })
}

/// The calendar date part of an MT5 time stamp.
fn parse_date(s: &str) -> Option<NaiveDate> {
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })
}
