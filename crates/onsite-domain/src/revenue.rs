//! Income recognized by the business.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Dated, Identifiable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueSource {
    Invoice,
    Other,
}

impl RevenueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueSource::Invoice => "invoice",
            RevenueSource::Other => "other",
        }
    }
}

impl fmt::Display for RevenueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRevenueSource(pub String);

impl fmt::Display for UnknownRevenueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown revenue source `{}` (expected invoice or other)", self.0)
    }
}

impl std::error::Error for UnknownRevenueSource {}

impl FromStr for RevenueSource {
    type Err = UnknownRevenueSource;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "invoice" => Ok(RevenueSource::Invoice),
            "other" => Ok(RevenueSource::Other),
            _ => Err(UnknownRevenueSource(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub source: RevenueSource,
}

impl Revenue {
    pub fn from_new(id: Uuid, entry: NewRevenue) -> Self {
        Self {
            id,
            date: entry.date,
            amount: entry.amount,
            source: entry.source,
        }
    }
}

impl Identifiable for Revenue {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for Revenue {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRevenue {
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub source: RevenueSource,
}

impl NewRevenue {
    pub fn new(date: DateTime<Utc>, amount: f64, source: RevenueSource) -> Self {
        Self {
            date,
            amount,
            source,
        }
    }
}
