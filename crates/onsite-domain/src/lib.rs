//! onsite-domain
//!
//! Pure domain models for the OnSite ledger (Expense, Revenue, Ledger, monthly summaries)
//! and the simulated session. No I/O, no CLI, no storage.

pub mod common;
pub mod expense;
pub mod ledger;
pub mod revenue;
pub mod session;
pub mod summary;

pub use common::*;
pub use expense::*;
pub use ledger::*;
pub use revenue::*;
pub use session::*;
pub use summary::*;
