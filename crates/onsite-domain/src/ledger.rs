use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Dated, Expense, Identifiable, NewExpense, NewRevenue, Revenue, RevenueSource};

/// The pair of collections tracked by the finance store. Insertion ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub revenues: Vec<Revenue>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Illustrative entries shown on first run, all dated `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let expenses = vec![
            Expense::from_new(
                Uuid::new_v4(),
                NewExpense::new(now, 1250.0, "Fuel")
                    .with_job_id("j1")
                    .with_job_title("Smith Family — HVAC"),
            ),
            Expense::from_new(
                Uuid::new_v4(),
                NewExpense::new(now, 980.0, "Supplies")
                    .with_job_id("j2")
                    .with_job_title("Acme LLC — Maintenance"),
            ),
        ];
        let revenues = vec![Revenue::from_new(
            Uuid::new_v4(),
            NewRevenue::new(now, 152100.0, RevenueSource::Invoice),
        )];
        Self { expenses, revenues }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.revenues.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.expenses.len() + self.revenues.len()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        find_by_id(&self.expenses, id)
    }

    pub fn revenue(&self, id: Uuid) -> Option<&Revenue> {
        find_by_id(&self.revenues, id)
    }

    pub fn total_income(&self) -> f64 {
        sum_amounts(&self.revenues)
    }

    pub fn total_expenses(&self) -> f64 {
        sum_amounts(&self.expenses)
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn sum_amounts<T: Dated>(items: &[T]) -> f64 {
    items.iter().map(Dated::amount).sum()
}
