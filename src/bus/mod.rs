use crate::entity::Entity;
use crate::state::State;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;


/// Event name for entity registrations
pub const EVENT_ENTITY_ADDED: &str = "entity_added";
/// Event name for state transitions
pub const EVENT_STATE_CHANGED: &str = "state_changed";

/// Payload published when an entity is registered
#[derive(Clone, Debug, Serialize)]
pub struct EntityAddedEvent {
    pub entity: Entity,
}

/// Payload published on every state write
#[derive(Clone, Debug)]
pub struct StateChangedEvent {
    pub entity_id: String,
    /// None on the first write for an entity
    pub previous_state: Option<Arc<State>>,
    pub current_state: Arc<State>,
}

impl StateChangedEvent {
    /// Transport projection of the payload.
    pub fn to_json(&self) -> Value {
        json!({
            "entity_id": self.entity_id,
            "previous_state": self.previous_state.as_ref().map(|s| s.as_json().clone()),
            "current_state": self.current_state.as_json().clone(),
        })
    }
}

/// Process-wide fan-out for registry events.
///
/// One broadcast channel per event kind. Dispatch is fire-and-forget: a
/// publish with no live subscribers is dropped, and a lagging subscriber
/// loses oldest events first. Delivery beyond that is the subscriber's
/// problem, not the registry's.
pub struct EventBus {
    entity_added_tx: broadcast::Sender<EntityAddedEvent>,
    state_changed_tx: broadcast::Sender<StateChangedEvent>,
}

impl EventBus {
    pub fn new(entity_added_capacity: usize, state_changed_capacity: usize) -> Self {
        let (entity_added_tx, _) = broadcast::channel(entity_added_capacity);
        let (state_changed_tx, _) = broadcast::channel(state_changed_capacity);

        Self {
            entity_added_tx,
            state_changed_tx,
        }
    }

    pub fn dispatch_entity_added(&self, event: EntityAddedEvent) {
        debug!(
            event = EVENT_ENTITY_ADDED,
            entity_id = %event.entity.entity_id,
            "Dispatching event"
        );
        let _ = self.entity_added_tx.send(event);
    }

    pub fn dispatch_state_changed(&self, event: StateChangedEvent) {
        debug!(
            event = EVENT_STATE_CHANGED,
            entity_id = %event.entity_id,
            "Dispatching event"
        );
        let _ = self.state_changed_tx.send(event);
    }

    /// Subscribe to entity-added events
    pub fn subscribe_entity_added(&self) -> broadcast::Receiver<EntityAddedEvent> {
        self.entity_added_tx.subscribe()
    }

    /// Subscribe to state-changed events
    pub fn subscribe_state_changed(&self) -> broadcast::Receiver<StateChangedEvent> {
        self.state_changed_tx.subscribe()
    }
}
