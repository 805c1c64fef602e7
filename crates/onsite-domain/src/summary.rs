//! Month buckets and the per-month cashflow record.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A `YYYY-MM` aggregation bucket. Orders lexicographically, which matches
/// chronological order for four digit years.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self(format!("{:04}-{:02}", year, month))
    }

    /// Buckets `date` by the year and month it falls in within `zone`.
    pub fn from_datetime<Tz: TimeZone>(date: &DateTime<Utc>, zone: &Tz) -> Self {
        let local = date.with_timezone(zone);
        Self::new(local.year(), local.month())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl MonthlySummary {
    pub fn new(month: MonthKey, income: f64, expenses: f64) -> Self {
        Self {
            month,
            income,
            expenses,
            net: income - expenses,
        }
    }
}

/// Income, expenses and net across the whole ledger, not tied to any month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl SummaryTotals {
    pub fn new(income: f64, expenses: f64) -> Self {
        Self {
            income,
            expenses,
            net: income - expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn month_is_zero_padded() {
        assert_eq!(MonthKey::new(2025, 3).as_str(), "2025-03");
        assert_eq!(MonthKey::new(2025, 11).as_str(), "2025-11");
    }

    #[test]
    fn month_follows_the_zone_not_utc() {
        let date = Utc.with_ymd_and_hms(2025, 1, 31, 23, 30, 0).unwrap();
        let johannesburg = FixedOffset::east_opt(2 * 3600).unwrap();
        let honolulu = FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(MonthKey::from_datetime(&date, &Utc).as_str(), "2025-01");
        assert_eq!(MonthKey::from_datetime(&date, &johannesburg).as_str(), "2025-02");

        let first = Utc.with_ymd_and_hms(2025, 3, 1, 5, 0, 0).unwrap();
        assert_eq!(MonthKey::from_datetime(&first, &honolulu).as_str(), "2025-02");
    }

    #[test]
    fn summary_serializes_month_as_plain_string() {
        let record = MonthlySummary::new(MonthKey::new(2025, 1), 1000.0, 400.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["month"], "2025-01");
        assert_eq!(json["net"], 600.0);
    }
}
