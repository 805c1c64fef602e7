use onsite_domain::{format_timestamp, Ledger};

pub const HEADER: &str = "Type,Date,Amount,Description,JobId,JobTitle,Source";

/// Expenses first, then revenues, each in collection order. Fields are written
/// verbatim without quoting and lines are joined with `\n`.
pub fn render(ledger: &Ledger) -> String {
    let mut rows = Vec::with_capacity(1 + ledger.entry_count());
    rows.push(HEADER.to_string());
    for expense in &ledger.expenses {
        let date = format_timestamp(&expense.date);
        let amount = format_amount(expense.amount);
        let fields: [&str; 7] = [
            "Expense",
            &date,
            &amount,
            &expense.description,
            expense.job_id.as_deref().unwrap_or(""),
            expense.job_title.as_deref().unwrap_or(""),
            "",
        ];
        rows.push(fields.join(","));
    }
    for revenue in &ledger.revenues {
        let date = format_timestamp(&revenue.date);
        let amount = format_amount(revenue.amount);
        let fields: [&str; 7] = [
            "Revenue",
            &date,
            &amount,
            "",
            "",
            "",
            revenue.source.as_str(),
        ];
        rows.push(fields.join(","));
    }
    rows.join("\n")
}

/// Magnitudes at or above this print with an exponent.
const EXPONENT_ABOVE: f64 = 1e21;
/// Magnitudes below this print with an exponent.
const EXPONENT_BELOW: f64 = 1e-6;

/// Shortest form that round-trips: `120`, `12.5`. Very large and very small
/// magnitudes use an exponent with an explicit sign, `1e+21` and `1.5e-7`.
pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        return "0".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = amount.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        let scientific = format!("{:e}", amount);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => scientific,
        };
    }
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use onsite_domain::{Expense, NewExpense, NewRevenue, Revenue, RevenueSource};
    use uuid::Uuid;

    #[test]
    fn single_expense_produces_header_and_one_row() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let ledger = Ledger {
            expenses: vec![Expense::from_new(
                Uuid::new_v4(),
                NewExpense::new(date, 120.0, "Service call")
                    .with_job_id("j1")
                    .with_job_title("Smith Job"),
            )],
            revenues: Vec::new(),
        };
        assert_eq!(
            render(&ledger),
            "Type,Date,Amount,Description,JobId,JobTitle,Source\n\
             Expense,2025-01-01T00:00:00Z,120,Service call,j1,Smith Job,"
        );
    }

    #[test]
    fn revenues_follow_expenses_with_blank_expense_columns() {
        let jan = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2025, 2, 3, 8, 15, 0).unwrap();
        let ledger = Ledger {
            expenses: vec![Expense::from_new(
                Uuid::new_v4(),
                NewExpense::new(feb, 12.5, "Tape"),
            )],
            revenues: vec![Revenue::from_new(
                Uuid::new_v4(),
                NewRevenue::new(jan, 1000.0, RevenueSource::Invoice),
            )],
        };
        let csv = render(&ledger);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Expense,2025-02-03T08:15:00Z,12.5,Tape,,,");
        assert_eq!(lines[2], "Revenue,2025-01-10T00:00:00Z,1000,,,,invoice");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn empty_ledger_is_just_the_header() {
        assert_eq!(render(&Ledger::new()), HEADER);
    }

    #[test]
    fn amounts_print_like_plain_numbers() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(980.0), "980");
        assert_eq!(format_amount(0.25), "0.25");
        assert_eq!(format_amount(f64::INFINITY), "Infinity");
    }

    #[test]
    fn extreme_magnitudes_switch_to_exponent_form() {
        assert_eq!(format_amount(1e21), "1e+21");
        assert_eq!(format_amount(-2.5e22), "-2.5e+22");
        assert_eq!(format_amount(1e-7), "1e-7");
        assert_eq!(format_amount(1.5e-7), "1.5e-7");
        assert_eq!(format_amount(1e20), "100000000000000000000");
        assert_eq!(format_amount(0.000001), "0.000001");
        assert_eq!(format_amount(f64::NAN), "NaN");
    }
}
