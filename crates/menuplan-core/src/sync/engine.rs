//! Replay engine draining the pending-operation queue.
//!
//! Operations replay strictly sequentially in ascending timestamp
//! order, so an update queued after a create never races ahead of it.
//! A failed replay is recorded and left queued; one failure never
//! aborts the batch, and the engine itself never returns an error.

use std::sync::Arc;

use crate::api::{DishApi, FoodApi};
use crate::error::ApiError;
use crate::facade::{DISHES_KEY, FOODS_KEY};
use crate::model::{Dish, Food};
use crate::store::LocalStore;
use crate::sync::queue::PendingQueue;
use crate::sync::types::{Mutation, PendingOperation, SyncResult, SyncSummary, SyncedEntity};

/// Drains the queue against the remote API.
pub struct SyncEngine<A> {
    api: A,
    store: Arc<LocalStore>,
    queue: PendingQueue,
}

impl<A: DishApi + FoodApi> SyncEngine<A> {
    pub fn new(api: A, store: Arc<LocalStore>) -> Self {
        let queue = PendingQueue::new(store.clone());
        Self { api, store, queue }
    }

    /// Replay every queued operation in ascending timestamp order.
    pub async fn sync_all(&self) -> SyncSummary {
        let mut operations = self.queue.list();
        operations.sort_by_key(|op| op.timestamp);

        let mut summary = SyncSummary {
            total: operations.len(),
            ..SyncSummary::default()
        };
        tracing::info!(total = summary.total, "sync drain started");

        for operation in &operations {
            let result = self.dispatch(operation).await;
            if result.success {
                self.forget(&operation.id);
                summary.successful += 1;
            } else {
                summary.failed += 1;
            }
            summary.results.push(result);
        }

        tracing::info!(
            successful = summary.successful,
            failed = summary.failed,
            "sync drain finished"
        );
        summary
    }

    /// Replay a single queued operation, for manual per-item retry.
    /// Returns `None` when no operation with that id is queued.
    pub async fn sync_one(&self, operation_id: &str) -> Option<SyncResult> {
        let operation = self.queue.list().into_iter().find(|op| op.id == operation_id)?;
        let result = self.dispatch(&operation).await;
        if result.success {
            self.forget(&operation.id);
        }
        Some(result)
    }

    /// Number of queued operations.
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Queued operations in replay order.
    pub fn pending(&self) -> Vec<PendingOperation> {
        let mut operations = self.queue.list();
        operations.sort_by_key(|op| op.timestamp);
        operations
    }

    fn forget(&self, operation_id: &str) {
        if let Err(error) = self.queue.remove(operation_id) {
            tracing::warn!(id = %operation_id, %error, "failed to remove replayed operation");
        }
    }

    /// Exhaustive per-mutation dispatch. Any remote error is converted
    /// into a failed result here; nothing propagates.
    async fn dispatch(&self, operation: &PendingOperation) -> SyncResult {
        let outcome: Result<SyncedEntity, ApiError> = match &operation.mutation {
            Mutation::CreateDish(dish) => match self.api.create_dish(dish).await {
                Ok(created) => {
                    self.reconcile_dish(&dish.id, &created);
                    Ok(SyncedEntity::Dish(created))
                }
                Err(error) => Err(error),
            },
            Mutation::UpdateDish(dish) => self.api.update_dish(dish).await.map(SyncedEntity::Dish),
            Mutation::DeleteDish { id } => self
                .api
                .delete_dish(id)
                .await
                .map(|()| SyncedEntity::Deleted { id: id.clone() }),
            Mutation::CreateFood(food) => match self.api.create_food(food).await {
                Ok(created) => {
                    self.reconcile_food(&food.id, &created);
                    Ok(SyncedEntity::Food(created))
                }
                Err(error) => Err(error),
            },
            Mutation::UpdateFood(food) => self.api.update_food(food).await.map(SyncedEntity::Food),
            Mutation::DeleteFood { id } => self
                .api
                .delete_food(id)
                .await
                .map(|()| SyncedEntity::Deleted { id: id.clone() }),
        };

        match outcome {
            Ok(synced) => SyncResult {
                operation_id: operation.id.clone(),
                success: true,
                error: None,
                synced: Some(synced),
            },
            Err(error) => {
                tracing::warn!(id = %operation.id, %error, "replay failed, operation kept queued");
                SyncResult {
                    operation_id: operation.id.clone(),
                    success: false,
                    error: Some(error.to_string()),
                    synced: None,
                }
            }
        }
    }

    /// Replace the optimistic `temp_` record with the server-assigned
    /// one so the cache converges to the authoritative copy.
    fn reconcile_dish(&self, temp_id: &str, created: &Dish) {
        let result = self.store.update(DISHES_KEY, Vec::new(), |dishes: &mut Vec<Dish>| {
            match dishes.iter_mut().find(|d| d.id == temp_id) {
                Some(slot) => *slot = created.clone(),
                None => dishes.push(created.clone()),
            }
        });
        if let Err(error) = result {
            tracing::warn!(%error, "failed to reconcile created dish into cache");
        }
    }

    fn reconcile_food(&self, temp_id: &str, created: &Food) {
        let result = self.store.update(FOODS_KEY, Vec::new(), |foods: &mut Vec<Food>| {
            match foods.iter_mut().find(|f| f.id == temp_id) {
                Some(slot) => *slot = created.clone(),
                None => foods.push(created.clone()),
            }
        });
        if let Err(error) = result {
            tracing::warn!(%error, "failed to reconcile created food into cache");
        }
    }
}
