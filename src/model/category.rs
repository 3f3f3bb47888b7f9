use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::TransactionKind;

pub const FALLBACK_ICON: &str = "Tag";
pub const FALLBACK_COLOR: &str = "#9E9E9E";

/// Categorises transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
}

impl Category {
    /// User-added categories default to expense with the generic tag icon.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: TransactionKind::Expense,
            icon: FALLBACK_ICON.into(),
            color: FALLBACK_COLOR.into(),
        }
    }

    fn seed(id: &str, name: &str, kind: TransactionKind, icon: &str, color: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// Seed set handed out when no categories have been persisted yet.
pub static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    use TransactionKind::{Expense, Income};
    vec![
        Category::seed("exp_1", "Food & Dining", Expense, "Utensils", "#FF8042"),
        Category::seed("exp_2", "Transport", Expense, "Bus", "#00C49F"),
        Category::seed("exp_3", "Housing", Expense, "Home", "#0088FE"),
        Category::seed("exp_4", "Shopping", Expense, "ShoppingBag", "#FFBB28"),
        Category::seed("exp_5", "Entertainment", Expense, "Gamepad2", "#8884d8"),
        Category::seed("exp_6", "Health", Expense, "HeartPulse", "#ff7373"),
        Category::seed("exp_7", "Education", Expense, "BookOpen", "#82ca9d"),
        Category::seed("exp_8", "Gifts", Expense, "Gift", "#ffc658"),
        Category::seed("exp_9", "Investment Fees", Expense, "TrendingDown", "#607D8B"),
        Category::seed("exp_10", "Other Expense", Expense, "MoreHorizontal", "#9E9E9E"),
        Category::seed("inc_1", "Salary", Income, "Briefcase", "#4CAF50"),
        Category::seed("inc_2", "Investment Income", Income, "TrendingUp", "#F44336"),
        Category::seed("inc_3", "Passive Income", Income, "Percent", "#2196F3"),
        Category::seed("inc_4", "Other Income", Income, "Award", "#FF9800"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_has_ten_expense_and_four_income_entries() {
        let expense = DEFAULT_CATEGORIES
            .iter()
            .filter(|c| c.kind == TransactionKind::Expense)
            .count();
        let income = DEFAULT_CATEGORIES
            .iter()
            .filter(|c| c.kind == TransactionKind::Income)
            .count();
        assert_eq!(expense, 10);
        assert_eq!(income, 4);
    }

    #[test]
    fn user_category_defaults_to_expense_with_fallback_style() {
        let cat = Category::new("Pets");
        assert_eq!(cat.kind, TransactionKind::Expense);
        assert_eq!(cat.icon, FALLBACK_ICON);
        assert_eq!(cat.color, FALLBACK_COLOR);
    }
}
