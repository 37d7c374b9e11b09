//! In-memory adapters.

mod gym_store;

pub use gym_store::InMemoryGymStore;
