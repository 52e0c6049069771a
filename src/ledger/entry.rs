use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EntryError;

/// One ledger transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: EntryKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        kind: EntryKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            kind,
            description: description.into(),
        }
    }

    /// Boundary validation applied before an entry is dispatched to the
    /// session store. The store itself silently drops invalid entries.
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.description.trim().is_empty() {
            return Err(EntryError::EmptyDescription);
        }
        if self.amount < 0.0 {
            return Err(EntryError::NegativeAmount);
        }
        Ok(())
    }
}
