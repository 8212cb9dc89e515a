use serde::Serialize;

use crate::analytics::{
    compute_hot_cold_days, compute_performance_by_asset, compute_performance_by_weekday,
    compute_trade_stats, AnalyticsOptions, AssetPerformance, DayType, HotColdDay, TradeStats,
    WeekdayPerformance,
};
use crate::error::JournalError;
use crate::models::{Asset, Operation};

const RECENT_LIMIT: usize = 5;

/// Everything the dashboard shows, computed in one go from the current
/// operation list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub stats: TradeStats,
    pub by_weekday: WeekdayPerformance,
    pub by_asset: AssetPerformance,
    pub hot_cold_days: Vec<HotColdDay>,
    pub recent_operations: Vec<Operation>,
}

impl DashboardReport {
    pub fn build(
        operations: &[Operation],
        assets: &[Asset],
        options: AnalyticsOptions,
    ) -> Result<Self, JournalError> {
        let mut recent: Vec<Operation> = operations.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_LIMIT);

        Ok(DashboardReport {
            stats: compute_trade_stats(operations),
            by_weekday: compute_performance_by_weekday(operations, options.weekday_basis),
            by_asset: compute_performance_by_asset(operations, assets, options.asset_matching)?,
            hot_cold_days: compute_hot_cold_days(operations),
            recent_operations: recent,
        })
    }

    pub fn hot_day_count(&self) -> usize {
        self.hot_cold_days
            .iter()
            .filter(|d| d.day_type == DayType::Hot)
            .count()
    }

    pub fn cold_day_count(&self) -> usize {
        self.hot_cold_days
            .iter()
            .filter(|d| d.day_type == DayType::Cold)
            .count()
    }

    pub fn print_summary(&self) {
        let s = &self.stats;
        println!("\n{}", "=".repeat(60));
        println!("  TRADING JOURNAL DASHBOARD");
        println!("{}", "=".repeat(60));
        println!();
        println!("  TRADES");
        println!("  ───────────────────────────────────");
        println!("  Total:       {}", s.total_operations);
        println!(
            "  Win/Loss:    {} / {}",
            s.winning_operations, s.losing_operations
        );
        println!("  Win Rate:    {:.2}%", s.win_rate);
        println!("  Net P/L:     {:+.2}", s.total_profit);
        println!("  Avg Win:     {:+.2}", s.avg_winning);
        println!("  Avg Loss:    {:+.2}", s.avg_losing);
        println!("  Best:        {:+.2}", s.best_trade);
        println!("  Worst:       {:+.2}", s.worst_trade);
        println!("  Profit Factor: {:.2}", s.profit_factor);

        println!();
        println!("  BY WEEKDAY");
        println!("  ───────────────────────────────────");
        for i in 0..7 {
            println!(
                "  {:>9}: {:>3} trades | P/L {:+.2}",
                self.by_weekday.labels[i], self.by_weekday.count[i], self.by_weekday.performance[i]
            );
        }

        if !self.by_asset.labels.is_empty() {
            println!();
            println!("  BY ASSET");
            println!("  ───────────────────────────────────");
            let mut rows: Vec<_> = self.by_asset.rows().collect();
            rows.sort_by(|a, b| b.1.total_cmp(&a.1));
            for (symbol, perf, count) in rows {
                println!("  {:>9}: {:>3} trades | P/L {:+.2}", symbol, count, perf);
            }
        }

        println!();
        println!("  DAYS");
        println!("  ───────────────────────────────────");
        println!(
            "  Hot: {} | Cold: {}",
            self.hot_day_count(),
            self.cold_day_count()
        );

        if !self.recent_operations.is_empty() {
            println!();
            println!("  RECENT");
            println!("  ───────────────────────────────────");
            for op in &self.recent_operations {
                println!(
                    "  {} {:>8} {:<4} {:+.2}",
                    op.date, op.asset, op.operation_type, op.profit_loss
                );
            }
        }

        println!("{}", "=".repeat(60));
    }
}
