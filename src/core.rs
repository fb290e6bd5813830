use crate::bus::EventBus;
use crate::config::VigilConfig;
use crate::registry::EntityRegistry;
use crate::state::StateStore;
use std::sync::Arc;

/// Composition root for the registry subsystem.
///
/// Constructed once at startup and handed by reference to every producer
/// and consumer that needs it; nothing here is process-global.
pub struct Core {
    bus: Arc<EventBus>,
    states: Arc<StateStore>,
    registry: Arc<EntityRegistry>,
}

impl Core {
    pub fn new(config: &VigilConfig) -> Self {
        let bus = Arc::new(EventBus::new(
            config.bus.entity_added_capacity,
            config.bus.state_changed_capacity,
        ));
        let states = Arc::new(StateStore::new(Arc::clone(&bus)));
        let registry = Arc::new(EntityRegistry::new(Arc::clone(&bus), Arc::clone(&states)));

        Self {
            bus,
            states,
            registry,
        }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn states(&self) -> &Arc<StateStore> {
        &self.states
    }

    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new(&VigilConfig::default())
    }
}
