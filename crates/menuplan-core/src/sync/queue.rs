//! Durable pending-operation queue over the local store.
//!
//! No in-memory copy is kept between calls; every mutation goes
//! through the store's atomic `update`, so concurrent queue handles
//! (facades plus the sync engine) never lose each other's writes.

use chrono::Utc;
use std::sync::Arc;

use crate::error::StoreError;
use crate::store::LocalStore;
use crate::sync::types::{Mutation, PendingOperation};

/// Store key owned by this queue.
pub const PENDING_OPERATIONS_KEY: &str = "pending_operations";

/// Ordered, durable log of mutation intents.
#[derive(Clone)]
pub struct PendingQueue {
    store: Arc<LocalStore>,
}

impl PendingQueue {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Stamp an id and creation timestamp, append to the stored list.
    pub fn add(&self, mutation: Mutation) -> Result<PendingOperation, StoreError> {
        let now = Utc::now();
        let operation = PendingOperation {
            id: format!(
                "{}_{}_{}",
                mutation.kind().label(),
                mutation.entity().label(),
                now.timestamp_millis()
            ),
            timestamp: now,
            mutation,
        };

        self.store.update(
            PENDING_OPERATIONS_KEY,
            Vec::new(),
            |operations: &mut Vec<PendingOperation>| operations.push(operation.clone()),
        )?;
        tracing::debug!(id = %operation.id, "queued pending operation");
        Ok(operation)
    }

    /// Full stored list, in storage order.
    pub fn list(&self) -> Vec<PendingOperation> {
        self.store.get(PENDING_OPERATIONS_KEY, Vec::new())
    }

    /// Remove by id. An absent id is a no-op.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.store.update(
            PENDING_OPERATIONS_KEY,
            Vec::new(),
            |operations: &mut Vec<PendingOperation>| operations.retain(|op| op.id != id),
        )?;
        Ok(())
    }

    /// Empty the stored list.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.set(PENDING_OPERATIONS_KEY, &Vec::<PendingOperation>::new())
    }

    /// Number of queued operations, for the UI badge.
    pub fn pending_count(&self) -> usize {
        self.list().len()
    }
}
