use onsite_domain::MonthlySummary;

use super::{format_money, REPORT_HEADING, REPORT_TITLE};

const CELL_STYLE: &str = "padding:6px 10px;border:1px solid #ddd";
const TABLE_STYLE: &str = "border-collapse:collapse;font-family:Arial,sans-serif;font-size:12px";
const COLUMNS: [&str; 4] = ["Month", "Income", "Expenses", "Net"];

/// Printable cashflow document. Printing starts as soon as the view loads it.
pub fn render_html(rows: &[MonthlySummary]) -> String {
    let header: String = COLUMNS
        .iter()
        .map(|label| format!("<th style=\"{}\">{}</th>", CELL_STYLE, label))
        .collect();
    let body: String = rows.iter().map(render_row).collect();
    format!(
        "<!doctype html><html><head><title>{title}</title></head><body>\n\
         \x20 <h2>{heading}</h2>\n\
         \x20 <table style=\"{table}\">\n\
         \x20   <thead><tr>{header}</tr></thead>\n\
         \x20   <tbody>{body}</tbody>\n\
         \x20 </table>\n\
         \x20 <script>window.print();</script>\n\
         </body></html>",
        title = REPORT_TITLE,
        heading = REPORT_HEADING,
        table = TABLE_STYLE,
        header = header,
        body = body,
    )
}

fn render_row(row: &MonthlySummary) -> String {
    let cells = [
        escape_html(row.month.as_str()),
        format_money(row.income),
        format_money(row.expenses),
        format_money(row.net),
    ];
    let cells: String = cells
        .iter()
        .map(|value| format!("<td style=\"{}\">{}</td>", CELL_STYLE, value))
        .collect();
    format!("<tr>{}</tr>", cells)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
