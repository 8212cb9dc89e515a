use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Hot,
    Cold,
    /// Only produced by the calendar for dates without operations.
    Neutral,
}

impl DayType {
    /// Strictly positive net is hot; zero and below are cold.
    pub fn classify(performance: f64) -> Self {
        if performance > 0.0 {
            DayType::Hot
        } else {
            DayType::Cold
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Hot => write!(f, "hot"),
            DayType::Cold => write!(f, "cold"),
            DayType::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotColdDay {
    pub date: NaiveDate,
    pub performance: f64,
    #[serde(rename = "type")]
    pub day_type: DayType,
}

/// Net result per calendar date, one entry per date present in the input.
/// Returned in date order.
pub fn compute_hot_cold_days(operations: &[Operation]) -> Vec<HotColdDay> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for op in operations {
        *by_date.entry(op.date).or_insert(0.0) += op.profit_loss;
    }

    by_date
        .into_iter()
        .map(|(date, performance)| HotColdDay {
            date,
            performance,
            day_type: DayType::classify(performance),
        })
        .collect()
}
