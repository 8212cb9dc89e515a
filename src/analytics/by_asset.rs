use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::analytics::AssetMatching;
use crate::error::JournalError;
use crate::models::{Asset, Operation};

/// Per-symbol buckets, one per known asset in asset-list order, traded or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPerformance {
    pub labels: Vec<String>,
    pub performance: Vec<f64>,
    pub count: Vec<usize>,
}

impl AssetPerformance {
    pub fn total(&self) -> f64 {
        self.performance.iter().sum()
    }

    pub fn get(&self, symbol: &str) -> Option<(f64, usize)> {
        self.labels
            .iter()
            .position(|l| l == symbol)
            .map(|i| (self.performance[i], self.count[i]))
    }

    /// (symbol, performance, count) rows.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, usize)> {
        self.labels
            .iter()
            .zip(&self.performance)
            .zip(&self.count)
            .map(|((l, &p), &c)| (l.as_str(), p, c))
    }
}

/// Operations whose symbol is not in `assets` are skipped in permissive mode
/// and rejected in strict mode. A symbol listed twice keeps its first slot.
pub fn compute_performance_by_asset(
    operations: &[Operation],
    assets: &[Asset],
    matching: AssetMatching,
) -> Result<AssetPerformance, JournalError> {
    let mut out = AssetPerformance::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for asset in assets {
        if index.contains_key(asset.symbol.as_str()) {
            continue;
        }
        index.insert(asset.symbol.as_str(), out.labels.len());
        out.labels.push(asset.symbol.clone());
        out.performance.push(0.0);
        out.count.push(0);
    }

    let mut skipped = 0usize;
    for op in operations {
        match index.get(op.asset.as_str()) {
            Some(&i) => {
                out.performance[i] += op.profit_loss;
                out.count[i] += 1;
            }
            None => match matching {
                AssetMatching::Permissive => {
                    skipped += 1;
                    debug!(asset = %op.asset, id = ?op.id, "skipping operation on unknown asset");
                }
                AssetMatching::Strict => {
                    return Err(JournalError::UnknownAsset {
                        symbol: op.asset.clone(),
                        operation_id: op.id,
                    });
                }
            },
        }
    }

    if skipped > 0 {
        debug!("{} operation(s) left out of per-asset performance", skipped);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_trade_stats;
    use crate::test_helpers::{assets, op};

    #[test]
    fn initialises_every_asset_in_order() {
        let perf = compute_performance_by_asset(
            &[op("2025-04-01", "GBPUSD", 12.0)],
            &assets(&["EURUSD", "GBPUSD", "XAUUSD"]),
            AssetMatching::Permissive,
        )
        .unwrap();
        assert_eq!(perf.labels, vec!["EURUSD", "GBPUSD", "XAUUSD"]);
        assert_eq!(perf.performance, vec![0.0, 12.0, 0.0]);
        assert_eq!(perf.count, vec![0, 1, 0]);
    }

    #[test]
    fn unknown_symbols_are_skipped_silently() {
        let ops = vec![
            op("2025-04-01", "EURUSD", 30.0),
            op("2025-04-02", "DOGEUSD", 50.0),
            op("2025-04-03", "EURUSD", -10.0),
        ];
        let perf =
            compute_performance_by_asset(&ops, &assets(&["EURUSD"]), AssetMatching::Permissive)
                .unwrap();
        let stats = compute_trade_stats(&ops);
        assert_eq!(perf.get("EURUSD"), Some((20.0, 2)));
        assert!(perf.get("DOGEUSD").is_none());
        assert!((perf.total() - (stats.total_profit - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn strict_mode_reports_unknown_asset() {
        let mut unknown = op("2025-04-02", "DOGEUSD", 50.0);
        unknown.id = Some(4);
        let ops = vec![op("2025-04-01", "EURUSD", 30.0), unknown];
        let err = compute_performance_by_asset(&ops, &assets(&["EURUSD"]), AssetMatching::Strict)
            .unwrap_err();
        match err {
            JournalError::UnknownAsset { symbol, operation_id } => {
                assert_eq!(symbol, "DOGEUSD");
                assert_eq!(operation_id, Some(4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn full_match_sums_to_total_profit() {
        let ops = vec![op("2025-04-01", "EURUSD", 30.0), op("2025-04-02", "GBPUSD", -7.5)];
        let perf = compute_performance_by_asset(
            &ops,
            &assets(&["EURUSD", "GBPUSD"]),
            AssetMatching::Strict,
        )
        .unwrap();
        assert!((perf.total() - compute_trade_stats(&ops).total_profit).abs() < 1e-9);
    }

    #[test]
    fn no_assets_means_no_buckets() {
        let perf = compute_performance_by_asset(
            &[op("2025-04-01", "EURUSD", 30.0)],
            &[],
            AssetMatching::Permissive,
        )
        .unwrap();
        assert!(perf.labels.is_empty());
        assert_eq!(perf.total(), 0.0);
    }
}
