use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::JournalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[serde(alias = "compra")]
    Buy,
    #[serde(alias = "venta")]
    Sell,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Buy => write!(f, "buy"),
            OperationType::Sell => write!(f, "sell"),
        }
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "compra" => Ok(OperationType::Buy),
            "sell" | "venta" => Ok(OperationType::Sell),
            other => Err(format!("unknown operation type '{other}'")),
        }
    }
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Buy => "buy",
            OperationType::Sell => "sell",
        }
    }

    /// Signed result of a round trip at the given prices.
    pub fn profit_loss(self, entry_price: f64, exit_price: f64, volume: f64) -> f64 {
        match self {
            OperationType::Buy => (exit_price - entry_price) * volume,
            OperationType::Sell => (entry_price - exit_price) * volume,
        }
    }

    /// Exit price implied by a known profit, the inverse of `profit_loss`.
    /// Callers must reject a zero volume first.
    pub fn implied_exit_price(self, entry_price: f64, profit_loss: f64, volume: f64) -> f64 {
        if profit_loss == 0.0 {
            return entry_price;
        }
        match self {
            OperationType::Buy => entry_price + profit_loss / volume,
            OperationType::Sell => entry_price - profit_loss / volume,
        }
    }
}

/// One recorded trade.
///
/// `profit_loss` is normally derived from the other price fields, but it can
/// be set on its own (manual entries, broker imports) and the aggregation
/// code only ever reads this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date: NaiveDate,
    pub asset: String,
    pub operation_type: OperationType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub volume: f64,
    pub profit_loss: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Operation {
    /// Build an unsaved operation with `profit_loss` computed from the prices,
    /// rounded to cents the way the entry form shows it.
    pub fn new(
        date: NaiveDate,
        asset: &str,
        operation_type: OperationType,
        entry_price: f64,
        exit_price: f64,
        volume: f64,
    ) -> Self {
        let profit_loss = round2(operation_type.profit_loss(entry_price, exit_price, volume));
        Self {
            id: None,
            date,
            asset: asset.to_string(),
            operation_type,
            entry_price,
            exit_price,
            volume,
            profit_loss,
            created_at: None,
        }
    }

    /// Override the computed result, e.g. for broker-reported profit including fees.
    pub fn with_profit_loss(mut self, profit_loss: f64) -> Self {
        self.profit_loss = profit_loss;
        self
    }

    pub fn is_win(&self) -> bool {
        self.profit_loss > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit_loss < 0.0
    }

    /// Whether `profit_loss` agrees with the price fields to the cent.
    pub fn is_consistent(&self) -> bool {
        let expected = self
            .operation_type
            .profit_loss(self.entry_price, self.exit_price, self.volume);
        (round2(expected) - round2(self.profit_loss)).abs() < 0.005
    }

    pub fn validate(&self) -> Result<(), JournalError> {
        if self.asset.trim().is_empty() {
            return Err(JournalError::InvalidOperation("asset is empty".to_string()));
        }
        for (name, value) in [
            ("entry price", self.entry_price),
            ("exit price", self.exit_price),
            ("volume", self.volume),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(JournalError::InvalidOperation(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.profit_loss.is_finite() {
            return Err(JournalError::InvalidOperation(
                "profit/loss is not a number".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge a partial update. `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: &OperationPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(asset) = &patch.asset {
            self.asset = asset.clone();
        }
        if let Some(operation_type) = patch.operation_type {
            self.operation_type = operation_type;
        }
        if let Some(entry_price) = patch.entry_price {
            self.entry_price = entry_price;
        }
        if let Some(exit_price) = patch.exit_price {
            self.exit_price = exit_price;
        }
        if let Some(volume) = patch.volume {
            self.volume = volume;
        }
        if let Some(profit_loss) = patch.profit_loss {
            self.profit_loss = profit_loss;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationPatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub operation_type: Option<OperationType>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub profit_loss: Option<f64>,
}

impl OperationPatch {
    pub fn is_empty(&self) -> bool {
        self == &OperationPatch::default()
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
