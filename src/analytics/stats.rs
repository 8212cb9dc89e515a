use serde::{Deserialize, Serialize};

use crate::models::Operation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub total_operations: usize,
    pub winning_operations: usize,
    pub losing_operations: usize,
    /// Percentage, 0..=100.
    pub win_rate: f64,
    pub total_profit: f64,
    pub avg_winning: f64,
    /// Mean of the losing results, so negative (or 0).
    pub avg_losing: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    /// Gross profit over gross loss; 0 when there are no losses.
    pub profit_factor: f64,
}

/// Summary counts, ratios and extrema. Break-even trades count toward the
/// total but are neither wins nor losses. Empty input yields all zeros,
/// including the best and worst trade.
pub fn compute_trade_stats(operations: &[Operation]) -> TradeStats {
    let total_operations = operations.len();
    if total_operations == 0 {
        return TradeStats::default();
    }

    let wins: Vec<f64> = operations
        .iter()
        .filter(|op| op.is_win())
        .map(|op| op.profit_loss)
        .collect();
    let losses: Vec<f64> = operations
        .iter()
        .filter(|op| op.is_loss())
        .map(|op| op.profit_loss)
        .collect();

    let gross_win: f64 = wins.iter().sum();
    let gross_loss: f64 = losses.iter().sum();
    let total_profit: f64 = operations.iter().map(|op| op.profit_loss).sum();

    let avg_winning = if !wins.is_empty() {
        gross_win / wins.len() as f64
    } else {
        0.0
    };
    let avg_losing = if !losses.is_empty() {
        gross_loss / losses.len() as f64
    } else {
        0.0
    };

    let profit_factor = if gross_loss < 0.0 {
        gross_win / gross_loss.abs()
    } else {
        0.0
    };

    let best_trade = operations
        .iter()
        .map(|op| op.profit_loss)
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_trade = operations
        .iter()
        .map(|op| op.profit_loss)
        .fold(f64::INFINITY, f64::min);

    TradeStats {
        total_operations,
        winning_operations: wins.len(),
        losing_operations: losses.len(),
        win_rate: wins.len() as f64 / total_operations as f64 * 100.0,
        total_profit,
        avg_winning,
        avg_losing,
        best_trade,
        worst_trade,
        profit_factor,
    }
}
