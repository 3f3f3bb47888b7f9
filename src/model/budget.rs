use serde::{Deserialize, Serialize};

/// Per-installation budget thresholds. A threshold of `0` means no budget is
/// set for that period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfig {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub enable_alerts: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            daily: 0.0,
            weekly: 0.0,
            monthly: 0.0,
            enable_alerts: true,
        }
    }
}
