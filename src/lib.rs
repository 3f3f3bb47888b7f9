#![doc(test(attr(deny(warnings))))]

//! LifeLedger tracks personal income and expenses with categories,
//! payment-method tags, periodic budgets, and aggregated statistics, all
//! persisted client-side as JSON.

pub mod cli;
pub mod editor;
pub mod errors;
pub mod model;
pub mod stats;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("lifeledger=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("LifeLedger tracing initialized.");
    });
}
