//! Domain entities and their seed defaults.

pub mod budget;
pub mod category;
pub mod tag;
pub mod transaction;

pub use budget::BudgetConfig;
pub use category::{Category, DEFAULT_CATEGORIES};
pub use tag::{Tag, DEFAULT_TAGS};
pub use transaction::{Transaction, TransactionKind};
