//! Offline mutation queue and replay engine.
//!
//! Mutations performed while the network is down are appended to a
//! durable queue and replayed against the remote API, in creation
//! order, once connectivity returns.

pub mod engine;
pub mod queue;
pub mod types;

#[cfg(test)]
mod engine_tests;

pub use engine::SyncEngine;
pub use queue::{PendingQueue, PENDING_OPERATIONS_KEY};
pub use types::{
    EntityKind, Mutation, OpKind, PendingOperation, SyncResult, SyncSummary, SyncedEntity,
};
