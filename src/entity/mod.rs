use serde::Serialize;
use serde_json::{Map, Value};


/// Registration request submitted by a producing component.
///
/// Descriptions are immutable once submitted. Producers report later state
/// changes through [`StateUpdate`] messages rather than mutating a shared
/// entity object, so the registry never races a producer over these fields.
#[derive(Clone, Debug)]
pub struct EntityDescription {
    /// Category tag (e.g. "sensor", "camera"), fixed at registration
    pub domain: String,
    /// Optional human-assigned short identifier, slugified before use
    pub object_id: Option<String>,
    /// Optional explicit entity id, used verbatim when present
    pub entity_id: Option<String>,
    /// Required display label
    pub name: String,
    /// Initial reported state value
    pub state: String,
    /// Initial supplementary metadata (opaque to the registry)
    pub attributes: Map<String, Value>,
}

impl EntityDescription {
    /// New description with a derived object id, no explicit entity id,
    /// and an "unknown" initial state.
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            object_id: None,
            entity_id: None,
            name: name.into(),
            state: "unknown".to_string(),
            attributes: Map::new(),
        }
    }

    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Registered entity metadata.
///
/// Identity fields only; the current state lives in the state store.
#[derive(Clone, Debug, Serialize)]
pub struct Entity {
    /// Globally unique id, "{domain}.{object_id}" unless explicitly assigned
    pub entity_id: String,
    pub domain: String,
    pub object_id: String,
    pub name: String,
}

/// Immutable state report for an already-registered entity.
#[derive(Clone, Debug, Default)]
pub struct StateUpdate {
    pub state: String,
    pub attributes: Map<String, Value>,
}

impl StateUpdate {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Normalize free-form text into an identifier-safe slug.
///
/// Lowercases, maps runs of characters outside `[a-z0-9]` to single
/// underscores, and trims leading/trailing underscores.
///
/// # Examples
///
/// ```
/// use vigil::entity::slugify;
///
/// assert_eq!(slugify("Front Door Camera"), "front_door_camera");
/// assert_eq!(slugify("  Zone-1 / East  "), "zone_1_east");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    // Starts true so leading separators are dropped
    let mut last_was_separator = true;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            slug.push('_');
            last_was_separator = true;
        }
    }

    if slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Slug used as the object id: the producer-supplied object id when present,
/// the display name otherwise.
pub fn assign_object_id(desc: &EntityDescription) -> String {
    match &desc.object_id {
        Some(object_id) => slugify(object_id),
        None => slugify(&desc.name),
    }
}

/// Canonical entity id for a description without an explicit id.
pub fn generate_entity_id(desc: &EntityDescription) -> String {
    format!("{}.{}", desc.domain, assign_object_id(desc))
}
