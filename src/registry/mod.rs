use crate::bus::{EntityAddedEvent, EventBus};
use crate::entity::{assign_object_id, generate_entity_id, Entity, EntityDescription, StateUpdate};
use crate::state::StateStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

#[cfg(test)]
mod tests;

/// Identifier authority for registered entities.
///
/// All mutations run under a single lock so the existence check, the
/// disambiguation loop, and the insert are one atomic sequence. The lock is
/// never held across event publication.
pub struct EntityRegistry {
    entities: Mutex<HashMap<String, Entity>>,
    bus: Arc<EventBus>,
    states: Arc<StateStore>,
}

impl EntityRegistry {
    pub fn new(bus: Arc<EventBus>, states: Arc<StateStore>) -> Self {
        Self {
            entities: Mutex::new(HashMap::new()),
            bus,
            states,
        }
    }

    /// Register the entity described by `desc` on behalf of `component`.
    ///
    /// Returns the finalized entity id, or None when the description is
    /// rejected. Rejections and id collisions are logged, never raised:
    /// the registry always makes forward progress.
    pub fn add_entity(&self, component: &str, desc: EntityDescription) -> Option<String> {
        if desc.name.trim().is_empty() {
            error!(
                component = %component,
                "Component is adding entities without a name, name is required for all entities"
            );
            return None;
        }

        let entity = {
            let mut entities = self.entities.lock().unwrap();

            let mut entity_id = match &desc.entity_id {
                Some(explicit) => explicit.clone(),
                None => generate_entity_id(&desc),
            };

            if entities.contains_key(&entity_id) {
                error!(
                    component = %component,
                    entity_id = %entity_id,
                    "Component does not generate unique entity IDs"
                );
                // First free suffix wins; monotonic, never random
                let mut suffix = 1;
                entity_id = loop {
                    let candidate = format!("{}_{}", entity_id, suffix);
                    if !entities.contains_key(&candidate) {
                        break candidate;
                    }
                    suffix += 1;
                };
            }

            let entity = Entity {
                entity_id: entity_id.clone(),
                domain: desc.domain.clone(),
                object_id: assign_object_id(&desc),
                name: desc.name.clone(),
            };
            entities.insert(entity_id, entity.clone());
            entity
        };

        debug!(
            component = %component,
            entity_id = %entity.entity_id,
            name = %entity.name,
            "Entity registered"
        );

        let entity_id = entity.entity_id.clone();
        self.bus.dispatch_entity_added(EntityAddedEvent { entity });
        self.states.set_state(
            &entity_id,
            StateUpdate {
                state: desc.state,
                attributes: desc.attributes,
            },
        );

        Some(entity_id)
    }

    /// Single entity lookup by id.
    pub fn get_entity(&self, entity_id: &str) -> Option<Entity> {
        self.entities.lock().unwrap().get(entity_id).cloned()
    }

    /// Point-in-time copy of the full id → entity mapping.
    ///
    /// Taken under the registry lock, so a concurrent registration is never
    /// observed half-applied.
    pub fn get_entities(&self) -> HashMap<String, Entity> {
        self.entities.lock().unwrap().clone()
    }
}
