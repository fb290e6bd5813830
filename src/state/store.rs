use crate::bus::{EventBus, StateChangedEvent};
use crate::entity::StateUpdate;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::State;

/// Holds the latest state snapshot per entity id and emits change events.
pub struct StateStore {
    /// Lock-free concurrent map for fast reads
    current: DashMap<String, Arc<State>>,

    bus: Arc<EventBus>,
}

impl StateStore {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            current: DashMap::new(),
            bus,
        }
    }

    /// Record a new snapshot for `entity_id` and publish the transition.
    ///
    /// Writers of the same id serialize on the map entry, and the event is
    /// published before the entry guard drops, so per-id events fire in
    /// exactly the order writes complete. Writes to different ids do not
    /// block one another. The store trusts its caller to have registered
    /// the entity first and does not validate attribute payloads.
    pub fn set_state(&self, entity_id: &str, update: StateUpdate) {
        debug!(
            entity_id = %entity_id,
            state = %update.state,
            "Setting state"
        );

        let current = Arc::new(State::new(
            entity_id.to_string(),
            update.state,
            update.attributes,
        ));

        match self.current.entry(entity_id.to_string()) {
            Entry::Occupied(mut slot) => {
                let previous = slot.insert(Arc::clone(&current));
                self.publish(entity_id, Some(previous), current);
                // slot guard drops here, after the event is on the bus
            }
            Entry::Vacant(slot) => {
                let slot = slot.insert(Arc::clone(&current));
                self.publish(entity_id, None, current);
                drop(slot);
            }
        }
    }

    /// Current snapshot for an entity, if any state has been reported.
    pub fn get_state(&self, entity_id: &str) -> Option<Arc<State>> {
        self.current
            .get(entity_id)
            .map(|state| Arc::clone(state.value()))
    }

    /// Point-in-time copy of every current snapshot.
    pub fn get_states(&self) -> HashMap<String, Arc<State>> {
        self.current
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    fn publish(&self, entity_id: &str, previous_state: Option<Arc<State>>, current_state: Arc<State>) {
        self.bus.dispatch_state_changed(StateChangedEvent {
            entity_id: entity_id.to_string(),
            previous_state,
            current_state,
        });
    }
}
