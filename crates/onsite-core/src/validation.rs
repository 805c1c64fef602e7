use onsite_domain::{NewExpense, NewRevenue};

use crate::CoreError;

/// Whether the finance store checks entries itself or trusts its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    #[default]
    Enforce,
    Trust,
}

pub fn validate_expense(entry: &NewExpense) -> Result<(), CoreError> {
    validate_amount(entry.amount)?;
    if entry.description.trim().is_empty() {
        return Err(CoreError::Validation(
            "expense description must not be empty".into(),
        ));
    }
    Ok(())
}

pub fn validate_revenue(entry: &NewRevenue) -> Result<(), CoreError> {
    validate_amount(entry.amount)
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "amount must be a finite number (got {})",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "amount must not be negative (got {})",
            amount
        )));
    }
    Ok(())
}
