// Entity model, identifier derivation, and slug normalization
pub mod entity;

// Typed event bus for registry notifications
pub mod bus;

// Entity registry (identifier authority)
pub mod registry;

// State store (latest snapshot per entity)
pub mod state;

// Daemon configuration
pub mod config;

// Composition root wiring bus, registry, and store
pub mod core;
