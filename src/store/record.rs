//! Record model
//!
//! A `Record` is one row of the `records` table. `NewRecord` and
//! `RecordPatch` are the validated write inputs; both are produced by the
//! API request layer and never carry empty strings or non-finite amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key
pub type RecordId = i64;

/// A persisted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub amount: f64,
}

/// Validated input for record creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub name: String,
    pub category: String,
    pub amount: f64,
}

impl NewRecord {
    /// Attach a store-assigned id
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            name: self.name,
            category: self.category,
            amount: self.amount,
        }
    }
}

/// Partial update
///
/// A `None` field is left unchanged. The request layer folds absent fields,
/// empty strings and null amounts into `None`, so `apply_to` is the whole
/// merge policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
}

impl RecordPatch {
    /// True when applying the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.amount.is_none()
    }

    /// Apply every present field to `record`
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
    }
}

/// Direction of the List operation, ordered by `id`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl ListOrder {
    /// SQL keyword for `ORDER BY id`
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            ListOrder::Ascending => "ASC",
            ListOrder::Descending => "DESC",
        }
    }
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOrder::Ascending => write!(f, "asc"),
            ListOrder::Descending => write!(f, "desc"),
        }
    }
}
