use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Entries that carry a booking timestamp and a monetary amount.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
    fn amount(&self) -> f64;
}

/// Renders a timestamp the way it is persisted and exported, `2025-01-01T00:00:00Z`.
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
