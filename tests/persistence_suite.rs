use chrono::NaiveDate;
use tempfile::TempDir;

use lifeledger::model::{
    BudgetConfig, Category, Tag, Transaction, TransactionKind, DEFAULT_CATEGORIES, DEFAULT_TAGS,
};
use lifeledger::storage::{JsonStore, Store};

fn store_with_temp_dir() -> (JsonStore, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("json store");
    (store, temp)
}

fn sample_transactions() -> Vec<Transaction> {
    let morning = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    vec![
        Transaction::new(50.0, TransactionKind::Expense, "exp_1", "pay_1", "lunch", morning),
        Transaction::new(
            1200.0,
            TransactionKind::Income,
            "inc_1",
            "pay_4",
            "salary",
            morning,
        ),
    ]
}

#[test]
fn fresh_store_serves_seed_defaults() {
    let (store, _guard) = store_with_temp_dir();
    assert!(store.transactions().is_empty());
    assert_eq!(store.budget(), BudgetConfig::default());
    assert_eq!(store.categories(), *DEFAULT_CATEGORIES);
    assert_eq!(store.tags(), *DEFAULT_TAGS);
}

#[test]
fn export_then_import_reproduces_all_four_collections() {
    let (source, _g1) = store_with_temp_dir();
    let transactions = sample_transactions();
    let budget = BudgetConfig {
        daily: 100.0,
        weekly: 500.0,
        monthly: 2000.0,
        enable_alerts: false,
    };
    let mut categories = DEFAULT_CATEGORIES.clone();
    categories.push(Category::new("Pets"));
    let mut tags = DEFAULT_TAGS.clone();
    tags.push(Tag::new("Gift Card"));

    source.save_transactions(&transactions).expect("save txns");
    source.save_budget(&budget).expect("save budget");
    source.save_categories(&categories).expect("save cats");
    source.save_tags(&tags).expect("save tags");

    let blob = source.export_snapshot().expect("export");

    let (target, _g2) = store_with_temp_dir();
    target.import_snapshot(&blob).expect("import");
    assert_eq!(target.transactions(), transactions);
    assert_eq!(target.budget(), budget);
    assert_eq!(target.categories(), categories);
    assert_eq!(target.tags(), tags);
}

#[test]
fn export_uses_the_legacy_accounts_key_for_tags() {
    let (store, _guard) = store_with_temp_dir();
    let blob = store.export_snapshot().expect("export");
    let value: serde_json::Value = serde_json::from_str(&blob).expect("valid json");
    assert!(value.get("accounts").is_some());
    assert!(value.get("tags").is_none());
    assert!(value.get("transactions").is_some());
    assert!(value.get("budget").is_some());
    assert!(value.get("categories").is_some());
}

#[test]
fn partial_import_touches_only_present_keys() {
    // Scenario F: a budget-only blob must leave the other collections alone.
    let (store, _guard) = store_with_temp_dir();
    let transactions = sample_transactions();
    store.save_transactions(&transactions).expect("seed txns");
    let categories_before = store.categories();

    store
        .import_snapshot(r#"{"budget":{"daily":50.0,"weekly":0.0,"monthly":0.0,"enable_alerts":true}}"#)
        .expect("partial import");

    assert_eq!(store.budget().daily, 50.0);
    assert_eq!(store.transactions(), transactions);
    assert_eq!(store.categories(), categories_before);
    assert_eq!(store.tags(), *DEFAULT_TAGS);
}

#[test]
fn malformed_import_is_rejected_wholesale() {
    let (store, _guard) = store_with_temp_dir();
    store
        .save_transactions(&sample_transactions())
        .expect("seed");
    assert!(store.import_snapshot("not json at all").is_err());
    assert!(store.import_snapshot(r#"{"transactions": 42}"#).is_err());
    assert_eq!(store.transactions().len(), 2);
}

#[test]
fn clear_all_restores_defaults_on_next_read() {
    let (store, _guard) = store_with_temp_dir();
    store
        .save_transactions(&sample_transactions())
        .expect("save txns");
    store.save_categories(&[Category::new("Only One")]).expect("save cats");
    store
        .save_budget(&BudgetConfig {
            daily: 10.0,
            ..BudgetConfig::default()
        })
        .expect("save budget");

    store.clear_all().expect("clear");

    assert!(store.transactions().is_empty());
    assert_eq!(store.budget(), BudgetConfig::default());
    assert_eq!(store.categories(), *DEFAULT_CATEGORIES);
    assert_eq!(store.tags(), *DEFAULT_TAGS);

    // Clearing an already-empty store is not an error.
    store.clear_all().expect("second clear");
}

#[test]
fn saving_the_same_collection_twice_stores_identical_content() {
    let (store, _guard) = store_with_temp_dir();
    let transactions = sample_transactions();
    store.save_transactions(&transactions).expect("first");
    let first = store.export_snapshot().expect("export");
    store.save_transactions(&transactions).expect("second");
    let second = store.export_snapshot().expect("export");
    assert_eq!(first, second);
}

#[test]
fn save_overwrites_rather_than_merges() {
    let (store, _guard) = store_with_temp_dir();
    store
        .save_transactions(&sample_transactions())
        .expect("seed two");
    let keep = vec![sample_transactions().remove(0)];
    store.save_transactions(&keep).expect("overwrite");
    assert_eq!(store.transactions().len(), 1);
}
