use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker kept on every tag record for compatibility with older snapshots,
/// where tags were stored as accounts of type `"tag"`.
pub const TAG_KIND: &str = "tag";

/// A payment-method label attached to transactions. Purely descriptive; not a
/// ledger account with a balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub kind: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: TAG_KIND.into(),
        }
    }

    fn seed(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TAG_KIND.into(),
        }
    }
}

/// Seed set handed out when no tags have been persisted yet.
pub static DEFAULT_TAGS: Lazy<Vec<Tag>> = Lazy::new(|| {
    vec![
        Tag::seed("pay_1", "Cash"),
        Tag::seed("pay_2", "WeChat Pay"),
        Tag::seed("pay_3", "Alipay"),
        Tag::seed("pay_4", "Bank Card"),
    ]
});
