use super::*;
use crate::core::Core;
use crate::entity::EntityDescription;
use serde_json::json;
use std::collections::HashSet;
use std::thread;

#[test]
fn test_add_entity_derives_id_from_name() {
    let core = Core::default();

    let entity_id = core
        .registry()
        .add_entity("camera_component", EntityDescription::new("camera", "Front Door Camera"))
        .unwrap();

    assert_eq!(entity_id, "camera.front_door_camera");
    let entity = core.registry().get_entity(&entity_id).unwrap();
    assert_eq!(entity.domain, "camera");
    assert_eq!(entity.object_id, "front_door_camera");
    assert_eq!(entity.name, "Front Door Camera");
}

#[test]
fn test_add_entity_uses_explicit_id_verbatim() {
    let core = Core::default();

    let entity_id = core
        .registry()
        .add_entity(
            "mqtt",
            EntityDescription::new("sensor", "Humidity")
                .with_entity_id("sensor.Custom_Humidity"),
        )
        .unwrap();

    assert_eq!(entity_id, "sensor.Custom_Humidity");
}

#[test]
fn test_collision_suffixes_in_call_order() {
    let core = Core::default();
    let registry = core.registry();

    let ids: Vec<String> = (0..3)
        .map(|_| {
            registry
                .add_entity("detector", EntityDescription::new("sensor", "Front Door"))
                .unwrap()
        })
        .collect();

    assert_eq!(
        ids,
        vec![
            "sensor.front_door".to_string(),
            "sensor.front_door_1".to_string(),
            "sensor.front_door_2".to_string(),
        ]
    );
    assert_eq!(registry.get_entities().len(), 3);
}

#[test]
fn test_collision_never_overwrites_existing_owner() {
    let core = Core::default();
    let registry = core.registry();

    registry
        .add_entity("first", EntityDescription::new("sensor", "Door").with_state("closed"))
        .unwrap();
    let second_id = registry
        .add_entity("second", EntityDescription::new("sensor", "Door").with_state("open"))
        .unwrap();

    // Original registration untouched, incoming entity got a new id
    assert_eq!(second_id, "sensor.door_1");
    assert_eq!(
        core.states().get_state("sensor.door").unwrap().state,
        "closed"
    );
    assert_eq!(
        core.states().get_state("sensor.door_1").unwrap().state,
        "open"
    );
}

#[test]
fn test_empty_name_rejected_without_crash() {
    let core = Core::default();

    let result = core
        .registry()
        .add_entity("broken_component", EntityDescription::new("sensor", ""));

    assert!(result.is_none());
    assert!(core.registry().get_entities().is_empty());

    // Blank-after-trim counts as missing too
    let result = core
        .registry()
        .add_entity("broken_component", EntityDescription::new("sensor", "   "));
    assert!(result.is_none());
    assert!(core.registry().get_entities().is_empty());
}

#[test]
fn test_get_entities_idempotent_read() {
    let core = Core::default();
    let registry = core.registry();

    registry
        .add_entity("comp", EntityDescription::new("sensor", "A"))
        .unwrap();
    registry
        .add_entity("comp", EntityDescription::new("sensor", "B"))
        .unwrap();

    let first = registry.get_entities();
    let second = registry.get_entities();
    assert_eq!(first.len(), second.len());
    for (id, entity) in &first {
        assert_eq!(second[id].entity_id, entity.entity_id);
        assert_eq!(second[id].name, entity.name);
    }
}

#[test]
fn test_registration_publishes_entity_added() {
    let core = Core::default();
    let mut rx = core.bus().subscribe_entity_added();

    core.registry()
        .add_entity("camera_component", EntityDescription::new("camera", "Backyard"))
        .unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.entity.entity_id, "camera.backyard");
    assert_eq!(event.entity.name, "Backyard");
}

#[test]
fn test_registration_records_initial_state() {
    let core = Core::default();
    let mut rx = core.bus().subscribe_state_changed();

    core.registry()
        .add_entity(
            "camera_component",
            EntityDescription::new("camera", "Backyard")
                .with_state("idle")
                .with_attribute("width", json!(1920)),
        )
        .unwrap();

    // Initial snapshot in the store
    let state = core.states().get_state("camera.backyard").unwrap();
    assert_eq!(state.state, "idle");
    assert_eq!(state.attributes.get("width"), Some(&json!(1920)));

    // Exactly one state-changed event, with no previous snapshot
    let event = rx.try_recv().unwrap();
    assert_eq!(event.entity_id, "camera.backyard");
    assert!(event.previous_state.is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_rejected_entity_publishes_nothing() {
    let core = Core::default();
    let mut added_rx = core.bus().subscribe_entity_added();
    let mut state_rx = core.bus().subscribe_state_changed();

    core.registry()
        .add_entity("broken_component", EntityDescription::new("sensor", ""));

    assert!(added_rx.try_recv().is_err());
    assert!(state_rx.try_recv().is_err());
}

#[test]
fn test_concurrent_colliding_registrations_stay_unique() {
    let core = Arc::new(Core::default());
    let mut handles = vec![];

    // 100 registrations all deriving the same id
    for _ in 0..100 {
        let core = Arc::clone(&core);
        let handle = thread::spawn(move || {
            core.registry()
                .add_entity("stress", EntityDescription::new("sensor", "Front Door"))
                .unwrap()
        });
        handles.push(handle);
    }

    let ids: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(ids.len(), 100);
    assert_eq!(core.registry().get_entities().len(), 100);
    assert!(ids.contains("sensor.front_door"));
}
