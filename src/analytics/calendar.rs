use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::analytics::hot_cold::{DayType, HotColdDay};
use crate::error::JournalError;

/// 6 weeks of 7 days.
pub const GRID_CELLS: usize = 42;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, JournalError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(Self::from_first_day)
            .ok_or_else(|| JournalError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    pub fn of(date: NaiveDate) -> Result<Self, JournalError> {
        date.with_day(1)
            .and_then(Self::from_first_day)
            .ok_or_else(|| JournalError::InvalidMonth(date.format("%Y-%m").to_string()))
    }

    /// Accepts a 1st only when the whole 42-cell grid around it is a
    /// representable date range.
    fn from_first_day(first: NaiveDate) -> Option<Self> {
        let lead = first.weekday().num_days_from_sunday() as u64;
        first
            .checked_sub_days(Days::new(lead))?
            .checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;
        Some(YearMonth(first))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn previous(&self) -> Option<Self> {
        self.0
            .checked_sub_months(Months::new(1))
            .and_then(Self::from_first_day)
    }

    pub fn next(&self) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(Self::from_first_day)
    }

    pub fn last_day(&self) -> NaiveDate {
        // The grid check guarantees the following 1st exists.
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|n| n.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// e.g. "April 2025".
    pub fn title(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for YearMonth {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .and_then(Self::from_first_day)
            .ok_or_else(|| JournalError::InvalidMonth(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    /// 1-based.
    pub month: u32,
    pub year: i32,
    pub is_current_month: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
    #[serde(rename = "type")]
    pub day_type: DayType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub traded_days: usize,
    pub hot_days: usize,
    pub cold_days: usize,
    pub net_performance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub year_month: YearMonth,
    pub days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// Rows of 7, Sunday first.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarDay> {
        self.days.chunks(7)
    }

    pub fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.is_current_month)
    }

    /// Totals over the target month's own cells; spillover days are ignored.
    pub fn month_summary(&self) -> MonthSummary {
        let mut summary = MonthSummary::default();
        for day in self.current_month_days() {
            let Some(perf) = day.performance else {
                continue;
            };
            summary.traded_days += 1;
            summary.net_performance += perf;
            match day.day_type {
                DayType::Hot => summary.hot_days += 1,
                DayType::Cold => summary.cold_days += 1,
                DayType::Neutral => {}
            }
        }
        summary
    }
}

/// 42 cells starting on the Sunday on or before the 1st, with previous- and
/// next-month spillover. Dates found in `hot_cold` carry their performance
/// and type; every other cell is neutral.
pub fn build_calendar_grid(year_month: YearMonth, hot_cold: &[HotColdDay]) -> CalendarGrid {
    let lookup: HashMap<NaiveDate, &HotColdDay> =
        hot_cold.iter().map(|d| (d.date, d)).collect();

    let first = year_month.first_day();
    let lead = first.weekday().num_days_from_sunday() as u64;
    // In range for every constructible `YearMonth`.
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);

    let days = start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let hit = lookup.get(&date);
            CalendarDay {
                date,
                day: date.day(),
                month: date.month(),
                year: date.year(),
                is_current_month: year_month.contains(date),
                performance: hit.map(|d| d.performance),
                day_type: hit.map_or(DayType::Neutral, |d| d.day_type),
            }
        })
        .collect();

    CalendarGrid { year_month, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_hot_cold_days;
    use crate::test_helpers::{date, op};

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn always_42_cells_with_full_month() {
        for year in [2023, 2024, 2025] {
            for month in 1..=12 {
                let m = YearMonth::new(year, month).unwrap();
                let grid = build_calendar_grid(m, &[]);
                assert_eq!(grid.days.len(), GRID_CELLS);
                assert_eq!(grid.current_month_days().count() as u32, m.days_in_month());
                assert_eq!(grid.days[0].date.weekday(), chrono::Weekday::Sun);
            }
        }
    }

    #[test]
    fn current_month_cells_are_one_to_n() {
        let grid = build_calendar_grid(ym("2024-02"), &[]);
        let days: Vec<u32> = grid.current_month_days().map(|d| d.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn april_2025_layout() {
        // 1 April 2025 is a Tuesday: two March days lead.
        let grid = build_calendar_grid(ym("2025-04"), &[]);
        assert_eq!(grid.days[0].date, date("2025-03-30"));
        assert!(!grid.days[0].is_current_month);
        assert_eq!(grid.days[2].date, date("2025-04-01"));
        assert!(grid.days[2].is_current_month);
        assert_eq!(grid.days[41].date, date("2025-05-10"));
        assert_eq!(grid.days[41].month, 5);
        assert_eq!(grid.weeks().count(), 6);
    }

    #[test]
    fn month_starting_on_sunday_has_no_lead() {
        // 1 June 2025 is a Sunday.
        let grid = build_calendar_grid(ym("2025-06"), &[]);
        assert_eq!(grid.days[0].date, date("2025-06-01"));
        assert_eq!(grid.days[41].date, date("2025-07-12"));
    }

    #[test]
    fn year_rollover() {
        let jan = build_calendar_grid(ym("2025-01"), &[]);
        assert_eq!(jan.days[0].date, date("2024-12-29"));
        assert_eq!(jan.days[0].year, 2024);
        assert_eq!(jan.days[0].month, 12);

        let dec = build_calendar_grid(ym("2024-12"), &[]);
        let last = dec.days.last().unwrap();
        assert_eq!(last.year, 2025);
        assert_eq!(last.month, 1);
    }

    #[test]
    fn merges_hot_cold_days() {
        let hot_cold = compute_hot_cold_days(&[
            op("2025-04-01", "EURUSD", 30.0),
            op("2025-04-01", "EURUSD", -10.0),
            op("2025-04-03", "BTCUSD", -5.0),
            op("2025-03-31", "EURUSD", 0.0),
        ]);
        let grid = build_calendar_grid(ym("2025-04"), &hot_cold);

        let cell = |d: &str| grid.days.iter().find(|c| c.date == date(d)).unwrap();
        assert_eq!(cell("2025-04-01").day_type, DayType::Hot);
        assert_eq!(cell("2025-04-01").performance, Some(20.0));
        assert_eq!(cell("2025-04-03").day_type, DayType::Cold);
        assert_eq!(cell("2025-04-02").day_type, DayType::Neutral);
        assert_eq!(cell("2025-04-02").performance, None);
        // Spillover days are still classified.
        assert_eq!(cell("2025-03-31").day_type, DayType::Cold);

        let summary = grid.month_summary();
        assert_eq!(summary.traded_days, 2);
        assert_eq!(summary.hot_days, 1);
        assert_eq!(summary.cold_days, 1);
        assert!((summary.net_performance - 15.0).abs() < 1e-9);
    }

    #[test]
    fn year_month_navigation_and_parsing() {
        let m = ym("2024-12");
        assert_eq!(m.next().unwrap().to_string(), "2025-01");
        assert_eq!(ym("2025-01").previous().unwrap().to_string(), "2024-12");
        assert_eq!(ym("2023-02").days_in_month(), 28);
        assert_eq!(ym("2024-02").days_in_month(), 29);
        assert_eq!(m.title(), "December 2024");
        assert_eq!(YearMonth::of(date("2025-04-17")).unwrap(), ym("2025-04"));
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("april".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2025, 0).is_err());
    }

    #[test]
    fn months_at_the_edge_of_the_date_range_are_refused() {
        let last_year = NaiveDate::MAX.year();
        assert!(matches!(
            YearMonth::new(last_year, 12),
            Err(JournalError::InvalidMonth(_))
        ));
        assert!(YearMonth::of(NaiveDate::MAX).is_err());

        // The last accepted month still renders a full grid, and stepping
        // past it stops instead of wrapping.
        let mut month = YearMonth::new(last_year, 1).unwrap();
        while let Some(next) = month.next() {
            month = next;
        }
        assert_eq!(month.year(), last_year);
        let grid = build_calendar_grid(month, &[]);
        assert_eq!(grid.days.len(), GRID_CELLS);
        assert_eq!(grid.current_month_days().count() as u32, month.days_in_month());
        assert!(grid.days.windows(2).all(|w| w[0].date < w[1].date));
    }
}
