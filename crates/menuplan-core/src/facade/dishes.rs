//! Dish facade: remote-first CRUD with offline fallback.

use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::DishApi;
use crate::connectivity::ConnectivityMonitor;
use crate::error::{CoreError, StoreError};
use crate::model::Dish;
use crate::store::LocalStore;
use crate::sync::queue::PendingQueue;
use crate::sync::types::Mutation;

/// Store key owned by this facade.
pub(crate) const DISHES_KEY: &str = "offline_dishes";

/// Caller-facing API for dishes; hides the online/offline branching.
pub struct DishFacade<A> {
    api: A,
    store: Arc<LocalStore>,
    monitor: Arc<ConnectivityMonitor>,
    queue: PendingQueue,
    // Serializes the remote call plus its cache/queue writes as one
    // protocol step. Per-key atomicity is the store's job.
    write_lock: Mutex<()>,
}

impl<A: DishApi> DishFacade<A> {
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

    /// Remote fetch, cache on success; any failure falls back to the
    /// cached collection (empty if nothing was ever cached).
    pub async fn get(&self) -> Vec<Dish> {
        match self.api.get_dishes().await {
            Ok(dishes) => {
                if let Err(error) = self.store.set(DISHES_KEY, &dishes) {
                    tracing::warn!(%error, "failed to cache fetched dishes");
                }
                dishes
            }
            Err(error) => {
                tracing::debug!(%error, "dish fetch failed, serving cache");
                self.cached()
            }
        }
    }

    /// Create remotely; while offline, synthesize a `temp_` record,
    /// cache it and queue the create.
    pub async fn create(&self, dish: Dish) -> Result<Dish, CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.create_dish(&dish).await {
            Ok(created) => {
                self.cache_upsert(&created)?;
                Ok(created)
            }
            Err(_) if self.monitor.is_offline() => {
                let temp = Dish {
                    id: format!("temp_{}", Uuid::new_v4()),
                    updated_at: chrono::Utc::now(),
                    ..dish
                };
                self.cache_upsert(&temp)?;
                self.queue.add(Mutation::CreateDish(temp.clone()))?;
                tracing::info!(id = %temp.id, "dish create queued while offline");
                Ok(temp)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Update remotely; while offline, patch the cache optimistically
    /// and queue the update.
    pub async fn update(&self, dish: Dish) -> Result<Dish, CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.update_dish(&dish).await {
            Ok(updated) => {
                self.cache_upsert(&updated)?;
                Ok(updated)
            }
            Err(_) if self.monitor.is_offline() => {
                let patched = Dish {
                    updated_at: chrono::Utc::now(),
                    ..dish
                };
                self.cache_upsert(&patched)?;
                self.queue.add(Mutation::UpdateDish(patched.clone()))?;
                tracing::info!(id = %patched.id, "dish update queued while offline");
                Ok(patched)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Delete remotely; while offline, drop from the cache and queue
    /// the delete.
    pub async fn remove(&self, id: &str) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        match self.api.delete_dish(id).await {
            Ok(()) => {
                self.cache_remove(id)?;
                Ok(())
            }
            Err(_) if self.monitor.is_offline() => {
                self.cache_remove(id)?;
                self.queue.add(Mutation::DeleteDish { id: id.to_string() })?;
                tracing::info!(%id, "dish delete queued while offline");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Current cached collection.
    pub fn cached(&self) -> Vec<Dish> {
        self.store.get(DISHES_KEY, Vec::new())
    }

    fn cache_upsert(&self, dish: &Dish) -> Result<(), StoreError> {
        self.store.update(DISHES_KEY, Vec::new(), |dishes: &mut Vec<Dish>| {
            match dishes.iter_mut().find(|d| d.id == dish.id) {
                Some(slot) => *slot = dish.clone(),
                None => dishes.push(dish.clone()),
            }
        })?;
        Ok(())
    }

    fn cache_remove(&self, id: &str) -> Result<(), StoreError> {
        self.store.update(DISHES_KEY, Vec::new(), |dishes: &mut Vec<Dish>| {
            dishes.retain(|d| d.id != id)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::model::DishStatus;
    use crate::sync::types::OpKind;
    use chrono::Utc;
    use tempfile::TempDir;

    /// API double that always fails, simulating an unreachable server.
    struct DownApi;

    impl DishApi for DownApi {
        async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
            Err(status(503))
        }
        async fn create_dish(&self, _dish: &Dish) -> Result<Dish, ApiError> {
            Err(status(503))
        }
        async fn update_dish(&self, _dish: &Dish) -> Result<Dish, ApiError> {
            Err(status(503))
        }
        async fn delete_dish(&self, _id: &str) -> Result<(), ApiError> {
            Err(status(503))
        }
    }

    /// API double that always succeeds, echoing a server-assigned id.
    struct UpApi;

    impl DishApi for UpApi {
        async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
            Ok(vec![dish("srv-1", "Remote")])
        }
        async fn create_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
            Ok(Dish {
                id: "srv-new".to_string(),
                ..dish.clone()
            })
        }
        async fn update_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
            Ok(dish.clone())
        }
        async fn delete_dish(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            message: "failed".to_string(),
        }
    }

    fn dish(id: &str, name: &str) -> Dish {
        Dish {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: vec![],
            tags: vec![],
            images: vec![],
            status: DishStatus::Draft,
            servings: 2,
            updated_at: Utc::now(),
        }
    }

    fn fixture<A: DishApi>(api: A, dir: &TempDir, online: bool) -> (DishFacade<A>, Arc<LocalStore>) {
        let store = Arc::new(LocalStore::new_with_path(dir.path().join("store.json")));
        let monitor = Arc::new(ConnectivityMonitor::new(online));
        (DishFacade::new(api, store.clone(), monitor), store)
    }

    #[tokio::test]
    async fn test_offline_create_round_trip() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(DownApi, &dir, false);

        let created = facade.create(dish("", "Lasagna")).await.unwrap();
        assert!(created.id.starts_with("temp_"));

        let cached: Vec<Dish> = store.get(DISHES_KEY, Vec::new());
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, created.id);

        let queue = PendingQueue::new(store);
        let ops = queue.list();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].mutation.kind(), OpKind::Create);
        match &ops[0].mutation {
            Mutation::CreateDish(queued) => assert_eq!(queued.id, created.id),
            other => panic!("expected queued dish create, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_online_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(DownApi, &dir, true);

        let err = facade.create(dish("", "Lasagna")).await.unwrap_err();
        assert!(matches!(err, CoreError::Api(ApiError::Status { status: 503, .. })));

        // No optimistic write, nothing queued.
        assert!(store.get::<Vec<Dish>>(DISHES_KEY, Vec::new()).is_empty());
        assert_eq!(PendingQueue::new(store).pending_count(), 0);
    }

    #[tokio::test]
    async fn test_get_falls_back_to_cache() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(DownApi, &dir, false);
        store.set(DISHES_KEY, &vec![dish("d1", "Cached")]).unwrap();

        let dishes = facade.get().await;
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].name, "Cached");
    }

    #[tokio::test]
    async fn test_get_falls_back_to_empty_without_cache() {
        let dir = TempDir::new().unwrap();
        let (facade, _store) = fixture(DownApi, &dir, false);
        assert!(facade.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_refreshes_cache_on_success() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(UpApi, &dir, true);

        let dishes = facade.get().await;
        assert_eq!(dishes[0].id, "srv-1");
        let cached: Vec<Dish> = store.get(DISHES_KEY, Vec::new());
        assert_eq!(cached, dishes);
    }

    #[tokio::test]
    async fn test_online_create_caches_server_record() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(UpApi, &dir, true);

        let created = facade.create(dish("", "Pie")).await.unwrap();
        assert_eq!(created.id, "srv-new");
        let cached: Vec<Dish> = store.get(DISHES_KEY, Vec::new());
        assert_eq!(cached[0].id, "srv-new");
    }

    #[tokio::test]
    async fn test_offline_update_patches_cache_and_queues() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(DownApi, &dir, false);
        store.set(DISHES_KEY, &vec![dish("d1", "Old name")]).unwrap();

        let updated = facade.update(dish("d1", "New name")).await.unwrap();
        assert_eq!(updated.name, "New name");

        let cached: Vec<Dish> = store.get(DISHES_KEY, Vec::new());
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "New name");
        assert_eq!(PendingQueue::new(store).pending_count(), 1);
    }

    #[tokio::test]
    async fn test_offline_remove_filters_cache_and_queues() {
        let dir = TempDir::new().unwrap();
        let (facade, store) = fixture(DownApi, &dir, false);
        store
            .set(DISHES_KEY, &vec![dish("d1", "Keep"), dish("d2", "Drop")])
            .unwrap();

        facade.remove("d2").await.unwrap();

        let cached: Vec<Dish> = store.get(DISHES_KEY, Vec::new());
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "d1");

        let ops = PendingQueue::new(store).list();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].mutation, Mutation::DeleteDish { id: "d2".to_string() });
    }

    #[tokio::test]
    async fn test_temp_ids_are_unique_across_rapid_creates() {
        let dir = TempDir::new().unwrap();
        let (facade, _store) = fixture(DownApi, &dir, false);

        let a = facade.create(dish("", "One")).await.unwrap();
        let b = facade.create(dish("", "Two")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
