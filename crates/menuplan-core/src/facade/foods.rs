//! Food facade; same online/offline protocol as dishes.

use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::FoodApi;
use crate::connectivity::ConnectivityMonitor;
use crate::error::{CoreError, StoreError};
use crate::model::Food;
use crate::store::LocalStore;
use crate::sync::queue::PendingQueue;
use crate::sync::types::Mutation;

/// Store key owned by this facade.
pub(crate) const FOODS_KEY: &str = "offline_foods";

pub struct FoodFacade<A> {
    api: A,
    store: Arc<LocalStore>,
    monitor: Arc<ConnectivityMonitor>,
    queue: PendingQueue,
    write_lock: Mutex<()>,
}

impl<A: FoodApi> FoodFacade<A> {
    pub fn new(api: A, store: Arc<LocalStore>, monitor: Arc<ConnectivityMonitor>) -> Self {
        let queue = PendingQueue::new(store.clone());
        Self {
            api,
            store,
            monitor,
            queue,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> Vec<Food> {
        match self.api.get_foods().await {
            Ok(foods) => {
                if let Err(error) = self.store.set(FOODS_KEY, &foods) {
                    tracing::warn!(%error, "failed to cache fetched foods");
                }
                foods
            }
            Err(error) => {
                tracing::debug!(%error, "food fetch failed, serving cache");
                self.cached()
            }
        }
    }

    pub async fn create(&self, food: Food) -> Result<Food, CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.create_food(&food).await {
            Ok(created) => {
                self.cache_upsert(&created)?;
                Ok(created)
            }
            Err(_) if self.monitor.is_offline() => {
                let temp = Food {
                    id: format!("temp_{}", Uuid::new_v4()),
                    updated_at: chrono::Utc::now(),
                    ..food
                };
                self.cache_upsert(&temp)?;
                self.queue.add(Mutation::CreateFood(temp.clone()))?;
                tracing::info!(id = %temp.id, "food create queued while offline");
                Ok(temp)
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn update(&self, food: Food) -> Result<Food, CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.update_food(&food).await {
            Ok(updated) => {
                self.cache_upsert(&updated)?;
                Ok(updated)
            }
            Err(_) if self.monitor.is_offline() => {
                let patched = Food {
                    updated_at: chrono::Utc::now(),
                    ..food
                };
                self.cache_upsert(&patched)?;
                self.queue.add(Mutation::UpdateFood(patched.clone()))?;
                tracing::info!(id = %patched.id, "food update queued while offline");
                Ok(patched)
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn remove(&self, id: &str) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.delete_food(id).await {
            Ok(()) => {
                self.cache_remove(id)?;
                Ok(())
            }
            Err(_) if self.monitor.is_offline() => {
                self.cache_remove(id)?;
                self.queue.add(Mutation::DeleteFood { id: id.to_string() })?;
                tracing::info!(%id, "food delete queued while offline");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn cached(&self) -> Vec<Food> {
        self.store.get(FOODS_KEY, Vec::new())
    }

    fn cache_upsert(&self, food: &Food) -> Result<(), StoreError> {
        self.store.update(FOODS_KEY, Vec::new(), |foods: &mut Vec<Food>| {
            match foods.iter_mut().find(|f| f.id == food.id) {
                Some(slot) => *slot = food.clone(),
                None => foods.push(food.clone()),
            }
        })?;
        Ok(())
    }

    fn cache_remove(&self, id: &str) -> Result<(), StoreError> {
        self.store.update(FOODS_KEY, Vec::new(), |foods: &mut Vec<Food>| {
            foods.retain(|f| f.id != id)
        })?;
        Ok(())
    }
}
