use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single income or expense record.
///
/// Records are immutable once committed; an edit replaces the whole record
/// keeping its id. Category and tag references may dangle after deletion and
/// resolve to an "unknown" label at display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: String,
    pub tag_id: String,
    #[serde(default)]
    pub note: String,
    pub occurred_at: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        category_id: impl Into<String>,
        tag_id: impl Into<String>,
        note: impl Into<String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            kind,
            category_id: category_id.into(),
            tag_id: tag_id.into(),
            note: note.into(),
            occurred_at,
        }
    }
}

/// Direction of money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}
