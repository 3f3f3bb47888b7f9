//! Aggregation engine: period totals, budget state, display-list selection,
//! category breakdown, and the trailing seven-day trend.
//!
//! Everything here is a pure function of its inputs; the presentation layer
//! recomputes on every mutation. The engine never fails: malformed records
//! are not filtered at this layer (validation is the editor's job), so a
//! corrupted record can skew totals.

pub mod period;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::model::{BudgetConfig, Category, Transaction, TransactionKind};

pub use period::{period_window, Period};

/// Label substituted for category references that no longer resolve.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Expense-to-threshold ratio at which the budget warning fires.
const WARNING_RATIO: f64 = 0.9;

/// Number of trailing calendar days covered by the trend series.
const TREND_DAYS: i64 = 7;

/// Ad-hoc display constraints. When any field is set, the display list is
/// computed from the whole history and the period window is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxFilter {
    pub kind: Option<TransactionKind>,
    pub tag_id: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl TxFilter {
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
            || self.tag_id.is_some()
            || self.date_start.is_some()
            || self.date_end.is_some()
    }

    fn matches(&self, txn: &Transaction) -> bool {
        let date = txn.occurred_at.date();
        if let Some(start) = self.date_start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.date_end {
            if date > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(tag_id) = &self.tag_id {
            if &txn.tag_id != tag_id {
                return false;
            }
        }
        true
    }
}

/// One expense group in the category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    pub total: f64,
}

/// Net income minus expense for one calendar day of the trend window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub label: String,
    pub net: f64,
}

/// Output of [`compute_aggregates`].
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    /// Budget threshold for the active period; `0` means no budget set.
    pub threshold: f64,
    /// `None` when no budget is set, in which case consumers show `net`.
    pub remaining: Option<f64>,
    pub is_over_budget: bool,
    pub is_warning: bool,
    /// Transactions to display, sorted descending by timestamp.
    pub display_list: Vec<Transaction>,
    /// Expense totals grouped by category label, discovery order.
    pub breakdown: Vec<CategorySlice>,
    /// Net-per-day points for the trailing week, calendar order.
    pub trend: Vec<TrendPoint>,
}

impl Aggregates {
    /// Top `n` breakdown slices by total, each with its share of the period
    /// expense. Shares are zero when the period has no expense.
    pub fn breakdown_top(&self, n: usize) -> Vec<(CategorySlice, f64)> {
        let total: f64 = self.breakdown.iter().map(|s| s.total).sum();
        let mut slices = self.breakdown.clone();
        slices.sort_by(|a, b| b.total.total_cmp(&a.total));
        slices
            .into_iter()
            .take(n)
            .map(|slice| {
                let share = if total > 0.0 { slice.total / total } else { 0.0 };
                (slice, share)
            })
            .collect()
    }
}

/// Computes all derived statistics for one reporting view.
pub fn compute_aggregates(
    transactions: &[Transaction],
    period: Period,
    filter: &TxFilter,
    budget: &BudgetConfig,
    categories: &[Category],
    now: NaiveDateTime,
) -> Aggregates {
    let (start, end) = period_window(period, now);
    let in_period: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.occurred_at >= start && t.occurred_at <= end)
        .collect();

    let income: f64 = in_period
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .map(|t| t.amount)
        .sum();
    let expense: f64 = in_period
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| t.amount)
        .sum();
    let net = income - expense;

    let threshold = match period {
        Period::Day => budget.daily,
        Period::Week => budget.weekly,
        Period::Month => budget.monthly,
    };
    let remaining = (threshold > 0.0).then(|| threshold - expense);
    let is_over_budget = remaining.is_some_and(|r| r < 0.0);
    let is_warning = !is_over_budget && remaining.is_some() && expense / threshold >= WARNING_RATIO;

    // Ad-hoc filters supersede the period view entirely rather than
    // narrowing it.
    let mut display_list: Vec<Transaction> = if filter.is_active() {
        transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    } else {
        in_period.iter().map(|t| (*t).clone()).collect()
    };
    display_list.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let breakdown = category_breakdown(&in_period, categories);
    let trend = trend_series(transactions, now);

    Aggregates {
        income,
        expense,
        net,
        threshold,
        remaining,
        is_over_budget,
        is_warning,
        display_list,
        breakdown,
        trend,
    }
}

/// Resolves a category id to its display label, substituting [`UNKNOWN_LABEL`]
/// for dangling references.
pub fn category_label<'a>(categories: &'a [Category], id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN_LABEL)
}

fn category_breakdown(in_period: &[&Transaction], categories: &[Category]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();
    for txn in in_period
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        let label = category_label(categories, &txn.category_id);
        match slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.total += txn.amount,
            None => slices.push(CategorySlice {
                label: label.to_string(),
                total: txn.amount,
            }),
        }
    }
    slices
}

/// Trailing-week net per calendar day over the whole history. Points are
/// emitted in calendar order; days without transactions are omitted, never
/// synthesized as zeros.
fn trend_series(transactions: &[Transaction], now: NaiveDateTime) -> Vec<TrendPoint> {
    let today = now.date();
    let window_start = today - Duration::days(TREND_DAYS - 1);
    let mut days: std::collections::BTreeMap<NaiveDate, f64> = std::collections::BTreeMap::new();
    for txn in transactions {
        let day = txn.occurred_at.date();
        if day < window_start || day > today {
            continue;
        }
        let signed = match txn.kind {
            TransactionKind::Income => txn.amount,
            TransactionKind::Expense => -txn.amount,
        };
        *days.entry(day).or_insert(0.0) += signed;
    }
    days.into_iter()
        .map(|(day, net)| TrendPoint {
            day,
            label: format!("{}/{}", day.month(), day.day()),
            net,
        })
        .collect()
}
