//! Interactive presentation layer. Loads the working set once at startup,
//! holds it in memory, writes full collections back through the store on
//! every mutation, and recomputes aggregates reactively.

pub mod commands;
pub mod output;

use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::errors::LedgerError;
use crate::model::{BudgetConfig, Category, Tag, Transaction};
use crate::stats::{compute_aggregates, Aggregates, Period, TxFilter};
use crate::storage::{JsonStore, Store};

pub type CliResult<T> = Result<T, LedgerError>;

/// In-memory working set plus view state. The transaction collection here is
/// the single source of truth; the store holds a serialized mirror.
pub struct App {
    store: JsonStore,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub budget: BudgetConfig,
    pub period: Period,
    pub filter: TxFilter,
}

impl App {
    pub fn new(store: JsonStore) -> Self {
        let transactions = store.transactions();
        let categories = store.categories();
        let tags = store.tags();
        let budget = store.budget();
        Self {
            store,
            transactions,
            categories,
            tags,
            budget,
            period: Period::Day,
            filter: TxFilter::default(),
        }
    }

    pub fn aggregates(&self) -> Aggregates {
        compute_aggregates(
            &self.transactions,
            self.period,
            &self.filter,
            &self.budget,
            &self.categories,
            Local::now().naive_local(),
        )
    }

    /// Commits a validated transaction: replaces the record with the same id
    /// or prepends a new one, then writes the collection through.
    pub fn commit_transaction(&mut self, txn: Transaction) -> CliResult<()> {
        match self.transactions.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => *existing = txn,
            None => self.transactions.insert(0, txn),
        }
        self.store.save_transactions(&self.transactions)
    }

    pub fn delete_transaction(&mut self, id: &str) -> CliResult<()> {
        self.transactions.retain(|t| t.id != id);
        self.store.save_transactions(&self.transactions)
    }

    pub fn save_budget(&mut self, budget: BudgetConfig) -> CliResult<()> {
        self.budget = budget;
        self.store.save_budget(&self.budget)
    }

    pub fn add_category(&mut self, category: Category) -> CliResult<()> {
        self.categories.push(category);
        self.store.save_categories(&self.categories)
    }

    pub fn delete_category(&mut self, id: &str) -> CliResult<()> {
        // No cascade: historical transactions keep the dangling reference and
        // resolve to "unknown" at display time.
        self.categories.retain(|c| c.id != id);
        self.store.save_categories(&self.categories)
    }

    pub fn add_tag(&mut self, tag: Tag) -> CliResult<()> {
        self.tags.push(tag);
        self.store.save_tags(&self.tags)
    }

    pub fn delete_tag(&mut self, id: &str) -> CliResult<()> {
        self.tags.retain(|t| t.id != id);
        self.store.save_tags(&self.tags)
    }

    pub fn export_snapshot(&self) -> CliResult<String> {
        self.store.export_snapshot()
    }

    pub fn import_snapshot(&mut self, blob: &str) -> CliResult<()> {
        self.store.import_snapshot(blob)?;
        self.reload();
        Ok(())
    }

    pub fn clear_all(&mut self) -> CliResult<()> {
        self.store.clear_all()?;
        self.reload();
        Ok(())
    }

    fn reload(&mut self) {
        self.transactions = self.store.transactions();
        self.categories = self.store.categories();
        self.tags = self.store.tags();
        self.budget = self.store.budget();
    }
}

pub(crate) fn prompt_err(err: dialoguer::Error) -> LedgerError {
    match err {
        dialoguer::Error::IO(io) => io.into(),
    }
}

/// Entry point for the interactive menu loop.
pub fn run() -> CliResult<()> {
    let store = JsonStore::new_default()?;
    tracing::info!(dir = %store.base_dir().display(), "opening data directory");
    let mut app = App::new(store);

    let entries = [
        "Dashboard",
        "Transactions",
        "Add transaction",
        "Reporting period",
        "Filter",
        "Budget settings",
        "Manage categories",
        "Manage tags",
        "Export data",
        "Import data",
        "Clear all data",
        "Quit",
    ];
    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("LifeLedger")
            .items(&entries)
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        let outcome = match choice {
            0 => commands::dashboard(&app),
            1 => commands::list_transactions(&mut app),
            2 => commands::add_transaction(&mut app),
            3 => commands::choose_period(&mut app),
            4 => commands::edit_filter(&mut app),
            5 => commands::budget_settings(&mut app),
            6 => commands::manage_categories(&mut app),
            7 => commands::manage_tags(&mut app),
            8 => commands::export_data(&app),
            9 => commands::import_data(&mut app),
            10 => commands::clear_all(&mut app),
            _ => break,
        };
        if let Err(err) = outcome {
            tracing::warn!(%err, "command failed");
            output::error(format!("Save failed: {err}"));
        }
    }
    Ok(())
}
