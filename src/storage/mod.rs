pub mod json_store;

use crate::errors::LedgerError;
use crate::model::{BudgetConfig, Category, Tag, Transaction};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends holding the four record collections.
///
/// Reads never fail: missing or malformed data degrades to the documented
/// default for the collection. Writes fully overwrite the prior content and
/// propagate I/O failures to the caller.
pub trait Store {
    fn transactions(&self) -> Vec<Transaction>;
    fn save_transactions(&self, data: &[Transaction]) -> Result<()>;

    fn budget(&self) -> BudgetConfig;
    fn save_budget(&self, config: &BudgetConfig) -> Result<()>;

    fn categories(&self) -> Vec<Category>;
    fn save_categories(&self, data: &[Category]) -> Result<()>;

    fn tags(&self) -> Vec<Tag>;
    fn save_tags(&self, data: &[Tag]) -> Result<()>;

    /// Serializes all four collections into one pretty-printed snapshot.
    fn export_snapshot(&self) -> Result<String>;

    /// Parses a snapshot and overwrites each collection present in it. On
    /// parse failure nothing is changed.
    fn import_snapshot(&self, blob: &str) -> Result<()>;

    /// Removes all persisted entries; defaults reappear on the next read.
    fn clear_all(&self) -> Result<()>;
}

pub use json_store::{export_file_name, JsonStore, Snapshot};
