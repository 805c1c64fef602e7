use std::collections::BTreeMap;

use onsite_domain::{Dated, Ledger, MonthKey, MonthlySummary, SummaryTotals};

use crate::MonthZone;

pub struct SummaryService;

impl SummaryService {
    /// One record per month that has at least one entry, ascending by month key.
    /// Months without entries are not synthesized.
    pub fn monthly(ledger: &Ledger, zone: MonthZone) -> Vec<MonthlySummary> {
        let mut buckets: Buckets = BTreeMap::new();
        accumulate(&mut buckets, &ledger.revenues, zone, |bucket| &mut bucket.0);
        accumulate(&mut buckets, &ledger.expenses, zone, |bucket| &mut bucket.1);
        buckets
            .into_iter()
            .map(|(month, (income, expenses))| MonthlySummary::new(month, income, expenses))
            .collect()
    }

    /// Whole-ledger figures. `None` when nothing has been recorded.
    pub fn totals(ledger: &Ledger) -> Option<SummaryTotals> {
        if ledger.is_empty() {
            return None;
        }
        Some(SummaryTotals::new(
            ledger.total_income(),
            ledger.total_expenses(),
        ))
    }
}

/// Income and expenses per month.
type Buckets = BTreeMap<MonthKey, (f64, f64)>;

fn accumulate<T: Dated>(
    buckets: &mut Buckets,
    entries: &[T],
    zone: MonthZone,
    slot: fn(&mut (f64, f64)) -> &mut f64,
) {
    for entry in entries {
        let bucket = buckets.entry(zone.month_key(&entry.date())).or_default();
        *slot(bucket) += entry.amount();
    }
}
