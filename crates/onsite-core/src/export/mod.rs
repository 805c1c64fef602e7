//! Renderers for the ledger exports. Pure functions from ledger data to bytes.

pub mod csv;
pub mod pdf;
pub mod report;

pub const CSV_FILE_NAME: &str = "finance.csv";
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";
pub const PDF_FILE_NAME: &str = "finance.pdf";
pub const PDF_MIME: &str = "application/pdf";
pub const REPORT_TITLE: &str = "Cashflow";
pub const REPORT_HEADING: &str = "Income vs Expenses";

/// Money with exactly two decimals, never `-0.00`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}
