mod snapshot;
mod store;


pub use snapshot::State;
pub use store::StateStore;
