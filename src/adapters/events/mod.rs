//! Retention event emitter adapters.

mod in_memory;

pub use in_memory::InMemoryRetentionEmitter;
