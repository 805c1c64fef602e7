use std::io::Write;

use colored::Colorize;
use onsite_core::export::format_money;
use onsite_domain::{format_timestamp, Expense, MonthlySummary, Revenue, SummaryTotals};

use crate::errors::Result;

const MONTH_WIDTH: usize = 9;
const MONEY_WIDTH: usize = 14;

pub fn write_line(out: &mut dyn Write, line: impl AsRef<str>) -> Result<()> {
    writeln!(out, "{}", line.as_ref())?;
    Ok(())
}

pub fn write_summary(
    out: &mut dyn Write,
    rows: &[MonthlySummary],
    totals: Option<SummaryTotals>,
    currency: &str,
) -> Result<()> {
    if rows.is_empty() {
        return write_line(out, "No entries recorded yet.");
    }
    write_line(out, format!("Amounts in {}", currency).dimmed().to_string())?;
    write_line(
        out,
        format!(
            "{:<mw$}{:>w$}{:>w$}{:>w$}",
            "Month",
            "Income",
            "Expenses",
            "Net",
            mw = MONTH_WIDTH,
            w = MONEY_WIDTH
        )
        .bold()
        .to_string(),
    )?;
    for row in rows {
        write_line(
            out,
            summary_line(row.month.as_str(), row.income, row.expenses, row.net),
        )?;
    }
    if let Some(totals) = totals {
        write_line(
            out,
            summary_line("Total", totals.income, totals.expenses, totals.net),
        )?;
    }
    Ok(())
}

fn summary_line(label: &str, income: f64, expenses: f64, net: f64) -> String {
    let negative = net < 0.0;
    let net = format!("{:>w$}", format_money(net), w = MONEY_WIDTH);
    let net = if negative {
        net.red().to_string()
    } else {
        net.green().to_string()
    };
    format!(
        "{:<mw$}{:>w$}{:>w$}{}",
        label,
        format_money(income),
        format_money(expenses),
        net,
        mw = MONTH_WIDTH,
        w = MONEY_WIDTH
    )
}

pub fn write_expenses(out: &mut dyn Write, expenses: &[Expense]) -> Result<()> {
    write_line(out, format!("Expenses ({})", expenses.len()).bold().to_string())?;
    for expense in expenses {
        let job = match (&expense.job_id, &expense.job_title) {
            (Some(id), Some(title)) => format!(" [{} · {}]", id, title),
            (Some(id), None) => format!(" [{}]", id),
            (None, Some(title)) => format!(" [{}]", title),
            (None, None) => String::new(),
        };
        write_line(
            out,
            format!(
                "  {}  {:>12}  {}{}  {}",
                format_timestamp(&expense.date),
                format_money(expense.amount),
                expense.description,
                job,
                expense.id.to_string().dimmed()
            ),
        )?;
    }
    Ok(())
}

pub fn write_revenues(out: &mut dyn Write, revenues: &[Revenue]) -> Result<()> {
    write_line(out, format!("Revenues ({})", revenues.len()).bold().to_string())?;
    for revenue in revenues {
        write_line(
            out,
            format!(
                "  {}  {:>12}  {}  {}",
                format_timestamp(&revenue.date),
                format_money(revenue.amount),
                revenue.source,
                revenue.id.to_string().dimmed()
            ),
        )?;
    }
    Ok(())
}
