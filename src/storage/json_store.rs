use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;
use crate::model::{BudgetConfig, Category, Tag, Transaction, DEFAULT_CATEGORIES, DEFAULT_TAGS};

use super::{Result, Store};

const TRANSACTIONS_FILE: &str = "transactions.json";
const BUDGET_FILE: &str = "budget.json";
const CATEGORIES_FILE: &str = "categories.json";
// Tags were historically persisted as "accounts"; the key is kept so older
// snapshots and data dirs stay readable.
const ACCOUNTS_FILE: &str = "accounts.json";
const TMP_SUFFIX: &str = "tmp";

const HOME_ENV: &str = "LIFELEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".lifeledger";

/// JSON-file key-value store: one file per collection under a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_data_dir);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn read_or<T, F>(&self, file: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.path(file);
        if !path.exists() {
            return fallback();
        }
        let parsed = fs::read_to_string(&path)
            .map_err(LedgerError::from)
            .and_then(|data| Ok(serde_json::from_str(&data)?));
        match parsed {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(file, %err, "unreadable collection, falling back to default");
                fallback()
            }
        }
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        let path = self.path(file);
        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, file: &str) -> Result<()> {
        match fs::remove_file(self.path(file)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Store for JsonStore {
    fn transactions(&self) -> Vec<Transaction> {
        self.read_or(TRANSACTIONS_FILE, Vec::new)
    }

    fn save_transactions(&self, data: &[Transaction]) -> Result<()> {
        self.write(TRANSACTIONS_FILE, &data)
    }

    fn budget(&self) -> BudgetConfig {
        self.read_or(BUDGET_FILE, BudgetConfig::default)
    }

    fn save_budget(&self, config: &BudgetConfig) -> Result<()> {
        self.write(BUDGET_FILE, config)
    }

    fn categories(&self) -> Vec<Category> {
        self.read_or(CATEGORIES_FILE, || DEFAULT_CATEGORIES.clone())
    }

    fn save_categories(&self, data: &[Category]) -> Result<()> {
        self.write(CATEGORIES_FILE, &data)
    }

    fn tags(&self) -> Vec<Tag> {
        self.read_or(ACCOUNTS_FILE, || DEFAULT_TAGS.clone())
    }

    fn save_tags(&self, data: &[Tag]) -> Result<()> {
        self.write(ACCOUNTS_FILE, &data)
    }

    fn export_snapshot(&self) -> Result<String> {
        let snapshot = Snapshot {
            transactions: Some(self.transactions()),
            budget: Some(self.budget()),
            categories: Some(self.categories()),
            accounts: Some(self.tags()),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    fn import_snapshot(&self, blob: &str) -> Result<()> {
        let snapshot: Snapshot = serde_json::from_str(blob)
            .map_err(|err| LedgerError::Import(err.to_string()))?;
        if let Some(transactions) = snapshot.transactions {
            self.save_transactions(&transactions)?;
        }
        if let Some(budget) = snapshot.budget {
            self.save_budget(&budget)?;
        }
        if let Some(categories) = snapshot.categories {
            self.save_categories(&categories)?;
        }
        if let Some(tags) = snapshot.accounts {
            self.save_tags(&tags)?;
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.remove(TRANSACTIONS_FILE)?;
        self.remove(BUDGET_FILE)?;
        self.remove(CATEGORIES_FILE)?;
        self.remove(ACCOUNTS_FILE)?;
        Ok(())
    }
}

/// Combined export/import shape. Any subset of the keys may be present on
/// import; absent keys leave existing data untouched. The `accounts` key name
/// is retained for backward compatibility with earlier exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Tag>>,
}

/// Suggested file name for a snapshot export, e.g. `lifeledger_backup_2024-03-15.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("lifeledger_backup_{}.json", date.format("%Y-%m-%d"))
}

fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    fn sample_transaction() -> Transaction {
        let occurred_at = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Transaction::new(
            50.0,
            TransactionKind::Expense,
            "exp_1",
            "pay_1",
            "lunch",
            occurred_at,
        )
    }

    #[test]
    fn missing_files_yield_documented_defaults() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.transactions().is_empty());
        assert_eq!(store.budget(), BudgetConfig::default());
        assert_eq!(store.categories(), *DEFAULT_CATEGORIES);
        assert_eq!(store.tags(), *DEFAULT_TAGS);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let txn = sample_transaction();
        store.save_transactions(&[txn.clone()]).expect("save");
        assert_eq!(store.transactions(), vec![txn]);
    }

    #[test]
    fn malformed_file_falls_back_to_default() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path(TRANSACTIONS_FILE), "not json {").expect("write");
        assert!(store.transactions().is_empty());
        fs::write(store.path(CATEGORIES_FILE), "[1, 2, 3]").expect("write");
        assert_eq!(store.categories(), *DEFAULT_CATEGORIES);
    }

    #[test]
    fn saving_twice_is_idempotent_on_disk() {
        let (store, _guard) = store_with_temp_dir();
        let txns = vec![sample_transaction()];
        store.save_transactions(&txns).expect("first save");
        let first = fs::read_to_string(store.path(TRANSACTIONS_FILE)).expect("read");
        store.save_transactions(&txns).expect("second save");
        let second = fs::read_to_string(store.path(TRANSACTIONS_FILE)).expect("read");
        assert_eq!(first, second);
    }

    #[test]
    fn import_rejects_malformed_blob_without_changes() {
        let (store, _guard) = store_with_temp_dir();
        store
            .save_transactions(&[sample_transaction()])
            .expect("seed");
        let err = store.import_snapshot("{ truncated").expect_err("must fail");
        assert!(matches!(err, LedgerError::Import(_)));
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn export_file_name_follows_convention() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(export_file_name(date), "lifeledger_backup_2024-03-15.json");
    }
}
