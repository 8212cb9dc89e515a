use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::analytics::WeekdayBasis;
use crate::models::Operation;

/// Display names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Seven parallel buckets indexed Sunday(0)..Saturday(6). Empty days stay
/// in place with zero performance and count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayPerformance {
    pub labels: Vec<String>,
    pub performance: [f64; 7],
    pub count: [usize; 7],
}

impl Default for WeekdayPerformance {
    fn default() -> Self {
        Self {
            labels: WEEKDAY_NAMES.iter().map(|s| s.to_string()).collect(),
            performance: [0.0; 7],
            count: [0; 7],
        }
    }
}

impl WeekdayPerformance {
    pub fn total(&self) -> f64 {
        self.performance.iter().sum()
    }

    pub fn get(&self, day: Weekday) -> (f64, usize) {
        let i = day.num_days_from_sunday() as usize;
        (self.performance[i], self.count[i])
    }

    /// Best weekday by net result, ignoring days without trades.
    pub fn best_day(&self) -> Option<(&str, f64)> {
        (0..7)
            .filter(|&i| self.count[i] > 0)
            .max_by(|&a, &b| self.performance[a].total_cmp(&self.performance[b]))
            .map(|i| (self.labels[i].as_str(), self.performance[i]))
    }

    pub fn worst_day(&self) -> Option<(&str, f64)> {
        (0..7)
            .filter(|&i| self.count[i] > 0)
            .min_by(|&a, &b| self.performance[a].total_cmp(&self.performance[b]))
            .map(|i| (self.labels[i].as_str(), self.performance[i]))
    }
}

pub fn weekday_of(date: NaiveDate, basis: WeekdayBasis) -> Weekday {
    match basis {
        WeekdayBasis::CalendarDate => date.weekday(),
        WeekdayBasis::Zoned(tz) => date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .with_timezone(&tz)
            .weekday(),
    }
}

pub fn compute_performance_by_weekday(
    operations: &[Operation],
    basis: WeekdayBasis,
) -> WeekdayPerformance {
    let mut out = WeekdayPerformance::default();
    for op in operations {
        let i = weekday_of(op.date, basis).num_days_from_sunday() as usize;
        out.performance[i] += op.profit_loss;
        out.count[i] += 1;
    }
    out
}
