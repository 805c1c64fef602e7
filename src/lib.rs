#![doc(test(attr(deny(warnings))))]

//! OnSite keeps the field-service business ledger: expenses and revenues persisted
//! locally, summarized per month and exported as CSV, PDF or a printable report.
//! This crate wires the stores together and hosts the `onsite_cli` front end.

pub mod app;
pub mod cli;
pub mod delivery;
pub mod errors;
pub mod utils;

pub use app::AppContext;
pub use delivery::DirectoryDelivery;
pub use errors::CliError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("OnSite tracing initialized.");
    });
}
