//! Shared in-memory state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefDoc {
    pub id: String,
}

/// Reference with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRefDoc {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One stored database document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub workload: String,
    pub tech_contact: RefDoc,
    pub region: NamedRefDoc,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<RefDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Value>,
}

impl DbRecord {
    /// The list-endpoint shape: everything except `access`.
    pub fn summary(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Some(map) = value.as_object_mut() {
            map.remove("access");
        }
        value
    }

    /// The detail-endpoint shape.
    pub fn detail(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Store {
    pub seq: u64,
    pub dbs: BTreeMap<String, DbRecord>,
}

/// Handle to the server's shared state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    inner: Arc<Mutex<Store>>,
}

impl AppState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn store(&self) -> MutexGuard<'_, Store> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Next record id, `DB-0001` style.
    pub(crate) fn next_id(&self) -> String {
        let mut store = self.store();
        store.seq += 1;
        format!("DB-{:04}", store.seq)
    }

    /// Insert a record directly, for test seeding.
    pub fn seed(&self, record: DbRecord) {
        self.store().dbs.insert(record.id.clone(), record.clone());
    }

    /// Fetch a record by id, for test assertions.
    pub fn record(&self, id: &str) -> Option<DbRecord> {
        self.store().dbs.get(id).cloned()
    }

    /// The supported hosting regions.
    pub fn regions() -> Vec<NamedRefDoc> {
        vec![
            NamedRefDoc {
                id: "eu-west".into(),
                name: Some("Europe West".into()),
            },
            NamedRefDoc {
                id: "us-east".into(),
                name: Some("US East".into()),
            },
            NamedRefDoc {
                id: "apac".into(),
                name: Some("Asia Pacific".into()),
            },
        ]
    }
}
