use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// On-disk shape of one tab's storage file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabRecord {
    pub version: u32,
    /// RFC 3339 time the record was first written.
    pub created_at: String,
    /// Process identity that wrote the record; see `default_tab_owner`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl TabRecord {
    #[must_use]
    pub fn v1(created_at: impl Into<String>) -> Self {
        Self {
            version: 1,
            created_at: created_at.into(),
            owner: None,
            values: BTreeMap::new(),
        }
    }
}
