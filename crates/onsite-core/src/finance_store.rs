use std::sync::Arc;

use onsite_domain::{Expense, Ledger, MonthlySummary, NewExpense, NewRevenue, Revenue};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    delivery::{ExportFile, FileDelivery, PrintableDocument},
    export::{self, CSV_FILE_NAME, CSV_MIME, PDF_FILE_NAME, PDF_MIME, REPORT_TITLE},
    storage::{load_state, save_state, KeyValueStore},
    validation::{validate_expense, validate_revenue, ValidationPolicy},
    Clock, CoreError, MonthZone, SummaryService,
};

pub const FINANCE_STORE_KEY: &str = "finance-store";

#[derive(Debug, Clone)]
pub struct FinanceOptions {
    pub key: String,
    pub zone: MonthZone,
    pub policy: ValidationPolicy,
    /// Start from the illustrative entries when nothing is persisted yet.
    pub seed_defaults: bool,
    /// Persist after every successful add.
    pub autosave: bool,
}

impl Default for FinanceOptions {
    fn default() -> Self {
        Self {
            key: FINANCE_STORE_KEY.into(),
            zone: MonthZone::default(),
            policy: ValidationPolicy::default(),
            seed_defaults: true,
            autosave: true,
        }
    }
}

/// Owns the expense and revenue collections and answers the reporting queries.
pub struct FinanceStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    options: FinanceOptions,
    ledger: Ledger,
    dirty: bool,
}

impl FinanceStore {
    /// Restores the ledger persisted under `options.key`. When nothing is stored the
    /// store starts seeded (or empty, per `seed_defaults`) and unsaved.
    pub fn hydrate(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        options: FinanceOptions,
    ) -> Result<Self, CoreError> {
        let ledger = match load_state::<Ledger>(storage.as_ref(), &options.key)? {
            Some(ledger) => {
                debug!(
                    key = %options.key,
                    expenses = ledger.expenses.len(),
                    revenues = ledger.revenues.len(),
                    "restored finance state"
                );
                ledger
            }
            None if options.seed_defaults => {
                debug!(key = %options.key, "no finance state stored; using seeded defaults");
                Ledger::seeded(clock.now())
            }
            None => Ledger::new(),
        };
        Ok(Self {
            storage,
            clock,
            options,
            ledger,
            dirty: false,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    pub fn revenues(&self) -> &[Revenue] {
        &self.ledger.revenues
    }

    pub fn key(&self) -> &str {
        &self.options.key
    }

    /// True when entries were added since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Appends an expense under a fresh id.
    ///
    /// With autosave on, a failed write returns [`CoreError::Persistence`] but the
    /// expense stays in memory and the store stays dirty.
    pub fn add_expense(&mut self, entry: NewExpense) -> Result<Expense, CoreError> {
        if self.options.policy == ValidationPolicy::Enforce {
            validate_expense(&entry)?;
        }
        let id = fresh_id(|id| self.ledger.expense(id).is_some());
        let expense = Expense::from_new(id, entry);
        self.ledger.expenses.push(expense.clone());
        self.dirty = true;
        debug!(id = %expense.id, amount = expense.amount, "expense added");
        self.autosave()?;
        Ok(expense)
    }

    /// Appends a revenue under a fresh id. Failure semantics match [`FinanceStore::add_expense`].
    pub fn add_revenue(&mut self, entry: NewRevenue) -> Result<Revenue, CoreError> {
        if self.options.policy == ValidationPolicy::Enforce {
            validate_revenue(&entry)?;
        }
        let id = fresh_id(|id| self.ledger.revenue(id).is_some());
        let revenue = Revenue::from_new(id, entry);
        self.ledger.revenues.push(revenue.clone());
        self.dirty = true;
        debug!(id = %revenue.id, amount = revenue.amount, "revenue added");
        self.autosave()?;
        Ok(revenue)
    }

    /// Writes the whole ledger under the store key.
    pub fn save(&mut self) -> Result<(), CoreError> {
        save_state(self.storage.as_ref(), &self.options.key, &self.ledger)?;
        self.dirty = false;
        debug!(
            key = %self.options.key,
            entries = self.ledger.entry_count(),
            "finance state saved"
        );
        Ok(())
    }

    fn autosave(&mut self) -> Result<(), CoreError> {
        if !self.options.autosave {
            return Ok(());
        }
        self.save().map_err(|err| {
            warn!(key = %self.options.key, error = %err, "finance state not saved; keeping in-memory entries");
            err
        })
    }

    pub fn monthly_summary(&self) -> Vec<MonthlySummary> {
        SummaryService::monthly(&self.ledger, self.options.zone)
    }

    pub fn csv(&self) -> String {
        export::csv::render(&self.ledger)
    }

    pub fn report_html(&self) -> String {
        export::report::render_html(&self.monthly_summary())
    }

    pub fn report_pdf(&self) -> Vec<u8> {
        export::pdf::render_pdf(&self.monthly_summary())
    }

    /// Offers the ledger as `finance.csv`.
    pub fn export_csv(&self, delivery: &dyn FileDelivery) -> Result<(), CoreError> {
        let file = ExportFile::new(CSV_FILE_NAME, CSV_MIME, self.csv().into_bytes());
        delivery.download(&file).map_err(as_export_error)?;
        info!(file = CSV_FILE_NAME, bytes = file.bytes.len(), "csv export delivered");
        Ok(())
    }

    /// Opens the cashflow table as a printable document.
    pub fn export_printable(&self, delivery: &dyn FileDelivery) -> Result<(), CoreError> {
        let document = PrintableDocument::new(REPORT_TITLE, self.report_html());
        delivery.open_printable(&document).map_err(as_export_error)?;
        info!(title = REPORT_TITLE, "printable report opened");
        Ok(())
    }

    /// Offers the cashflow table as `finance.pdf`.
    pub fn export_pdf(&self, delivery: &dyn FileDelivery) -> Result<(), CoreError> {
        let file = ExportFile::new(PDF_FILE_NAME, PDF_MIME, self.report_pdf());
        delivery.download(&file).map_err(as_export_error)?;
        info!(file = PDF_FILE_NAME, bytes = file.bytes.len(), "pdf export delivered");
        Ok(())
    }
}

fn fresh_id(taken: impl Fn(Uuid) -> bool) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !taken(id) {
            return id;
        }
    }
}

fn as_export_error(err: CoreError) -> CoreError {
    match err {
        CoreError::ExportUnavailable(_) => err,
        other => CoreError::ExportUnavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, MemoryKeyValueStore};
    use chrono::{TimeZone, Utc};
    use onsite_domain::RevenueSource;

    fn empty_store() -> FinanceStore {
        let options = FinanceOptions {
            zone: MonthZone::utc(),
            seed_defaults: false,
            ..FinanceOptions::default()
        };
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        FinanceStore::hydrate(Arc::new(MemoryKeyValueStore::new()), Arc::new(clock), options)
            .expect("hydrate")
    }

    #[test]
    fn january_scenario_nets_income_against_expenses() {
        let mut store = empty_store();
        store
            .add_revenue(NewRevenue::new(
                Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
                1000.0,
                RevenueSource::Invoice,
            ))
            .unwrap();
        store
            .add_expense(NewExpense::new(
                Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
                400.0,
                "Fuel",
            ))
            .unwrap();
        let summary = store.monthly_summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].month.as_str(), "2025-01");
        assert_eq!(summary[0].income, 1000.0);
        assert_eq!(summary[0].expenses, 400.0);
        assert_eq!(summary[0].net, 600.0);
    }

    #[test]
    fn enforce_policy_rejects_without_touching_the_ledger() {
        let mut store = empty_store();
        let err = store
            .add_expense(NewExpense::new(Utc::now(), -5.0, "Refund"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.expenses().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn trust_policy_accepts_malformed_entries_as_is() {
        let mut store = empty_store();
        store.options.policy = ValidationPolicy::Trust;
        let expense = store
            .add_expense(NewExpense::new(Utc::now(), -5.0, ""))
            .unwrap();
        assert_eq!(expense.amount, -5.0);
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn export_errors_are_reported_as_unavailable() {
        let err = as_export_error(CoreError::Persistence("disk gone".into()));
        assert!(matches!(err, CoreError::ExportUnavailable(ref msg) if msg.contains("disk gone")));
    }
}
