//! onsite-core
//!
//! Ledger and session services for OnSite.
//! Depends on onsite-domain. Storage and file delivery are reached only through the
//! [`storage::KeyValueStore`] and [`delivery::FileDelivery`] seams.

pub mod delivery;
pub mod error;
pub mod export;
pub mod finance_store;
pub mod session_store;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod validation;
pub mod zone;

pub use delivery::{ExportFile, FileDelivery, PrintableDocument};
pub use error::CoreError;
pub use finance_store::{FinanceOptions, FinanceStore, FINANCE_STORE_KEY};
pub use session_store::{SessionStore, AUTH_STORE_KEY};
pub use storage::{KeyValueStore, MemoryKeyValueStore};
pub use summary_service::SummaryService;
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::ValidationPolicy;
pub use zone::MonthZone;
