use std::io::Write;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use onsite_core::{
    export::{CSV_FILE_NAME, PDF_FILE_NAME, REPORT_TITLE},
    SummaryService,
};
use onsite_domain::{NewExpense, NewRevenue, RevenueSource};

use super::CommandEntry;
use crate::{
    app::AppContext,
    cli::{args::ParsedArgs, output},
    errors::{CliError, Result},
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-expense",
            "Record an expense",
            "add-expense --amount <n> --description <text> [--date <YYYY-MM-DD>] [--job-id <id>] [--job-title <title>]",
            cmd_add_expense,
        ),
        CommandEntry::new(
            "add-revenue",
            "Record income",
            "add-revenue --amount <n> [--date <YYYY-MM-DD>] [--source invoice|other]",
            cmd_add_revenue,
        ),
        CommandEntry::new(
            "summary",
            "Show income, expenses and net per month",
            "summary [--json]",
            cmd_summary,
        ),
        CommandEntry::new("list", "List every ledger entry", "list [--json]", cmd_list),
        CommandEntry::new(
            "export",
            "Write finance.csv, finance.pdf or the printable report",
            "export csv|pdf|html",
            cmd_export,
        ),
        CommandEntry::new(
            "backups",
            "List retained versions of the ledger",
            "backups",
            cmd_backups,
        ),
        CommandEntry::new(
            "restore",
            "Put a retained version of the ledger back in place",
            "restore <backup-id>",
            cmd_restore,
        ),
    ]
}

fn cmd_add_expense(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let amount = parse_form_amount(args.require("amount")?)?;
    let description = args.get("description").unwrap_or("").trim();
    if description.is_empty() {
        return Err(CliError::Input("description is required".into()));
    }
    let date = parse_date_or_today(context, args.get("date"))?;
    let mut entry = NewExpense::new(date, amount, description);
    if let Some(job_id) = non_blank(args.get("job-id")) {
        entry = entry.with_job_id(job_id);
    }
    if let Some(job_title) = non_blank(args.get("job-title")) {
        entry = entry.with_job_title(job_title);
    }

    let expense = context.finance.add_expense(entry)?;
    flush_unsaved(context)?;
    output::write_line(out, format!("Added expense {}", expense.id))
}

fn cmd_add_revenue(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let amount = parse_form_amount(args.require("amount")?)?;
    let source = match args.get("source") {
        Some(raw) => raw
            .parse::<RevenueSource>()
            .map_err(|err| CliError::Input(err.to_string()))?,
        None => RevenueSource::Invoice,
    };
    let date = parse_date_or_today(context, args.get("date"))?;

    let revenue = context
        .finance
        .add_revenue(NewRevenue::new(date, amount, source))?;
    flush_unsaved(context)?;
    output::write_line(out, format!("Added revenue {}", revenue.id))
}

fn cmd_summary(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let rows = context.finance.monthly_summary();
    if args.switch("json") {
        let json = serde_json::to_string_pretty(&rows).map_err(|err| CliError::Input(err.to_string()))?;
        return output::write_line(out, json);
    }
    let totals = SummaryService::totals(context.finance.ledger());
    output::write_summary(out, &rows, totals, &context.config().currency)
}

fn cmd_list(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    if args.switch("json") {
        let json = serde_json::to_string_pretty(context.finance.ledger())
            .map_err(|err| CliError::Input(err.to_string()))?;
        return output::write_line(out, json);
    }
    output::write_expenses(out, context.finance.expenses())?;
    output::write_revenues(out, context.finance.revenues())
}

fn cmd_export(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let delivery = context.delivery();
    let path = match args.positional(1) {
        Some("csv") => {
            context.finance.export_csv(delivery)?;
            delivery.download_path(CSV_FILE_NAME)
        }
        Some("pdf") => {
            context.finance.export_pdf(delivery)?;
            delivery.download_path(PDF_FILE_NAME)
        }
        Some("html") | Some("print") => {
            context.finance.export_printable(delivery)?;
            delivery.printable_path(REPORT_TITLE)
        }
        _ => return Err(CliError::Usage("usage: export csv|pdf|html".into())),
    };
    output::write_line(out, format!("Exported {}", path.display()))
}

fn cmd_backups(context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let backups = context.storage().list_backups(context.finance.key())?;
    if backups.is_empty() {
        return output::write_line(out, "No backups yet.");
    }
    for backup in backups {
        output::write_line(out, format!("{}  {}", backup.id, backup.path.display()))?;
    }
    Ok(())
}

fn cmd_restore(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let id = args
        .positional(1)
        .ok_or_else(|| CliError::Usage("usage: restore <backup-id>".into()))?;
    let backups = context.storage().list_backups(context.finance.key())?;
    let backup = backups
        .iter()
        .find(|backup| backup.id == id)
        .ok_or_else(|| CliError::Input(format!("no backup named `{}`; see `backups`", id)))?;
    context.storage().restore_backup(backup)?;
    context.reload_finance()?;
    output::write_line(
        out,
        format!(
            "Restored {} ({} entries)",
            backup.id,
            context.finance.ledger().entry_count()
        ),
    )
}

/// With autosave off the command still has to persist before the process exits.
fn flush_unsaved(context: &mut AppContext) -> Result<()> {
    if context.finance.is_dirty() {
        context.finance.save()?;
    }
    Ok(())
}

/// Same rule as the entry form: a number that is not zero.
fn parse_form_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("amount `{}` is not a number", raw)))?;
    if amount == 0.0 || amount.is_nan() {
        return Err(CliError::Input("amount must be a non-zero number".into()));
    }
    Ok(amount)
}

fn parse_date_or_today(context: &AppContext, raw: Option<&str>) -> Result<DateTime<Utc>> {
    match non_blank(raw) {
        Some(value) => parse_date(value),
        None => {
            let today = context.finance.clock().today();
            Ok(midnight_utc(today))
        }
    }
}

/// `YYYY-MM-DD` is midnight UTC; anything else must be RFC 3339.
pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(midnight_utc(day));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| CliError::Input(format!("date `{}` is not YYYY-MM-DD or RFC 3339", raw)))
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
