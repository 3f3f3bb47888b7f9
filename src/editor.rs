//! Transaction editor: validates and normalizes raw form input into a
//! well-formed [`Transaction`] before it is committed to the collection.

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::ValidationError;
use crate::model::{Category, Transaction, TransactionKind};

/// Maximum note length in characters; longer input is truncated, not rejected.
pub const NOTE_LIMIT: usize = 50;

/// Raw form fields as entered, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub amount: String,
    pub kind: TransactionKind,
    pub category_id: Option<String>,
    pub tag_id: Option<String>,
    pub note: String,
    pub date: String,
}

/// Validates a draft and mints a fresh transaction with a new unique id.
///
/// Amount must parse to a positive finite number, category and tag selections
/// are required, and a resolvable category must match the transaction kind
/// (dangling category ids are allowed; the orphan policy resolves them at
/// display time). A date-only input expands to that day's start of day.
pub fn validate(
    draft: &TransactionDraft,
    categories: &[Category],
) -> Result<Transaction, ValidationError> {
    let amount: f64 = draft
        .amount
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    let category_id = draft
        .category_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::CategoryRequired)?;
    let tag_id = draft
        .tag_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::TagRequired)?;

    if let Some(category) = categories.iter().find(|c| c.id == category_id) {
        if category.kind != draft.kind {
            return Err(ValidationError::CategoryKindMismatch);
        }
    }

    let occurred_at = parse_timestamp(&draft.date)?;
    let note = truncate_note(&draft.note);

    Ok(Transaction::new(
        amount,
        draft.kind,
        category_id,
        tag_id,
        note,
        occurred_at,
    ))
}

/// Validates a draft for an existing record, preserving its id. The entire
/// record is replaced.
pub fn validate_edit(
    draft: &TransactionDraft,
    categories: &[Category],
    id: &str,
) -> Result<Transaction, ValidationError> {
    let mut txn = validate(draft, categories)?;
    txn.id = id.to_string();
    Ok(txn)
}

/// First category matching the given kind, used to reset the selection when
/// the user switches transaction kind mid-entry.
pub fn first_category_for_kind(
    categories: &[Category],
    kind: TransactionKind,
) -> Option<&Category> {
    categories.iter().find(|c| c.kind == kind)
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).unwrap())
        .map_err(|_| ValidationError::InvalidDate)
}

fn truncate_note(note: &str) -> String {
    note.chars().take(NOTE_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn draft(amount: &str) -> TransactionDraft {
        TransactionDraft {
            amount: amount.into(),
            kind: TransactionKind::Expense,
            category_id: Some("exp_1".into()),
            tag_id: Some("pay_1".into()),
            note: "coffee".into(),
            date: "2024-03-15".into(),
        }
    }

    fn expense_category() -> Category {
        crate::model::DEFAULT_CATEGORIES[0].clone()
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        let txn = validate(&draft("12.50"), &[expense_category()]).expect("valid");
        assert_eq!(txn.amount, 12.5);
        assert_eq!(txn.occurred_at.hour(), 0);
        assert!(!txn.id.is_empty());
    }

    #[test]
    fn rejects_zero_negative_and_garbage_amounts() {
        for bad in ["0", "-5", "abc", "", "NaN", "inf"] {
            let err = validate(&draft(bad), &[]).expect_err(bad);
            assert_eq!(err, ValidationError::InvalidAmount);
        }
    }

    #[test]
    fn rejects_missing_category_and_tag() {
        let mut no_category = draft("10");
        no_category.category_id = None;
        assert_eq!(
            validate(&no_category, &[]),
            Err(ValidationError::CategoryRequired)
        );

        let mut empty_tag = draft("10");
        empty_tag.tag_id = Some(String::new());
        assert_eq!(validate(&empty_tag, &[]), Err(ValidationError::TagRequired));
    }

    #[test]
    fn rejects_category_whose_kind_mismatches() {
        let mut mismatched = draft("10");
        mismatched.kind = TransactionKind::Income;
        assert_eq!(
            validate(&mismatched, &[expense_category()]),
            Err(ValidationError::CategoryKindMismatch)
        );
    }

    #[test]
    fn dangling_category_id_still_passes() {
        // Orphan references are resolved at display time, not rejected here.
        let txn = validate(&draft("10"), &[]).expect("valid");
        assert_eq!(txn.category_id, "exp_1");
    }

    #[test]
    fn note_is_truncated_to_fifty_characters() {
        let mut long_note = draft("10");
        long_note.note = "x".repeat(80);
        let txn = validate(&long_note, &[expense_category()]).expect("valid");
        assert_eq!(txn.note.chars().count(), NOTE_LIMIT);
    }

    #[test]
    fn full_timestamps_are_accepted_as_is() {
        let mut timed = draft("10");
        timed.date = "2024-03-15T08:30:00".into();
        let txn = validate(&timed, &[expense_category()]).expect("valid");
        assert_eq!(txn.occurred_at.hour(), 8);
        assert_eq!(txn.occurred_at.minute(), 30);
    }

    #[test]
    fn rejects_garbage_dates() {
        let mut bad = draft("10");
        bad.date = "yesterday".into();
        assert_eq!(validate(&bad, &[]), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn edit_preserves_the_existing_id() {
        let txn = validate_edit(&draft("10"), &[expense_category()], "keep-me").expect("valid");
        assert_eq!(txn.id, "keep-me");
    }

    #[test]
    fn first_category_for_kind_finds_the_reset_target() {
        let categories = crate::model::DEFAULT_CATEGORIES.clone();
        let income = first_category_for_kind(&categories, TransactionKind::Income).expect("some");
        assert_eq!(income.id, "inc_1");
        assert!(first_category_for_kind(&[], TransactionKind::Income).is_none());
    }
}
