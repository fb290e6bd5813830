use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Immutable snapshot of one entity's state at a point in time.
///
/// Exactly one snapshot is current per entity. A superseded snapshot stays
/// alive only while an event payload still references it as
/// `previous_state`, then becomes unreachable.
#[derive(Debug, Serialize)]
pub struct State {
    pub entity_id: String,
    pub state: String,
    pub attributes: Map<String, Value>,
    pub timestamp: DateTime<Utc>,

    #[serde(skip)]
    as_json: OnceLock<Value>,
}

impl State {
    pub(crate) fn new(entity_id: String, state: String, attributes: Map<String, Value>) -> Self {
        Self {
            entity_id,
            state,
            attributes,
            timestamp: Utc::now(),
            as_json: OnceLock::new(),
        }
    }

    /// Transport projection, computed on first request and cached.
    ///
    /// Pure memoization of the immutable fields above, never a second
    /// source of truth.
    pub fn as_json(&self) -> &Value {
        self.as_json.get_or_init(|| {
            json!({
                "entity_id": self.entity_id,
                "state": self.state,
                "attributes": self.attributes,
                "timestamp": self.timestamp,
            })
        })
    }
}
