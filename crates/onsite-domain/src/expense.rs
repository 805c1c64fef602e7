//! Money spent on the business, optionally linked to a job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Dated, Identifiable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Display label of the linked job. Not kept in sync with `job_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl Expense {
    pub fn from_new(id: Uuid, entry: NewExpense) -> Self {
        Self {
            id,
            date: entry.date,
            amount: entry.amount,
            description: entry.description,
            job_id: entry.job_id,
            job_title: entry.job_title,
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for Expense {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// An expense as submitted, before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl NewExpense {
    pub fn new(date: DateTime<Utc>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            job_id: None,
            job_title: None,
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }
}
