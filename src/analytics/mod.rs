//! Pure aggregations over the operation list. Nothing here touches storage;
//! callers pass in whatever the store currently holds, in any order.

pub mod by_asset;
pub mod calendar;
pub mod hot_cold;
pub mod report;
pub mod stats;
pub mod weekday;

pub use by_asset::{compute_performance_by_asset, AssetPerformance};
pub use calendar::{build_calendar_grid, CalendarDay, CalendarGrid, MonthSummary, YearMonth};
pub use hot_cold::{compute_hot_cold_days, DayType, HotColdDay};
pub use report::DashboardReport;
pub use stats::{compute_trade_stats, TradeStats};
pub use weekday::{compute_performance_by_weekday, WeekdayPerformance, WEEKDAY_NAMES};

use chrono_tz::Tz;

/// How an operation's date is mapped to a day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayBasis {
    /// Use the recorded calendar date as is.
    #[default]
    CalendarDate,
    /// Read the date as UTC midnight and take the weekday in this zone.
    /// West of UTC this lands on the previous day.
    Zoned(Tz),
}

/// What to do with operations whose symbol is not in the asset list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetMatching {
    /// Skip them silently.
    #[default]
    Permissive,
    /// Fail with `JournalError::UnknownAsset`.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticsOptions {
    pub weekday_basis: WeekdayBasis,
    pub asset_matching: AssetMatching,
}
