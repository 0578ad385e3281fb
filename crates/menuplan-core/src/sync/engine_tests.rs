//! Tests for the replay engine.

use std::sync::Arc;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use crate::api::{DishApi, FoodApi};
use crate::error::ApiError;
use crate::facade::DISHES_KEY;
use crate::model::{Dish, DishStatus, Food};
use crate::store::LocalStore;
use crate::sync::engine::SyncEngine;
use crate::sync::queue::{PendingQueue, PENDING_OPERATIONS_KEY};
use crate::sync::types::{Mutation, PendingOperation, SyncedEntity};

/// Remote API double recording call order and failing on demand.
struct ScriptedApi {
    calls: Mutex<Vec<String>>,
    fail_for: Vec<String>,
}

impl ScriptedApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: Vec::new(),
        }
    }

    fn failing_for(names: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn maybe_fail(&self, name: &str) -> Result<(), ApiError> {
        if self.fail_for.iter().any(|f| f == name) {
            Err(ApiError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl DishApi for ScriptedApi {
    async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
        Ok(vec![])
    }

    async fn create_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        self.record(format!("create_dish:{}", dish.name));
        self.maybe_fail(&dish.name)?;
        Ok(Dish {
            id: format!("srv-{}", dish.name),
            ..dish.clone()
        })
    }

    async fn update_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        self.record(format!("update_dish:{}", dish.name));
        self.maybe_fail(&dish.name)?;
        Ok(dish.clone())
    }

    async fn delete_dish(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_dish:{id}"));
        self.maybe_fail(id)
    }
}

impl FoodApi for ScriptedApi {
    async fn get_foods(&self) -> Result<Vec<Food>, ApiError> {
        Ok(vec![])
    }

    async fn create_food(&self, food: &Food) -> Result<Food, ApiError> {
        self.record(format!("create_food:{}", food.name));
        self.maybe_fail(&food.name)?;
        Ok(Food {
            id: format!("srv-{}", food.name),
            ..food.clone()
        })
    }

    async fn update_food(&self, food: &Food) -> Result<Food, ApiError> {
        self.record(format!("update_food:{}", food.name));
        self.maybe_fail(&food.name)?;
        Ok(food.clone())
    }

    async fn delete_food(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_food:{id}"));
        self.maybe_fail(id)
    }
}

fn store(dir: &TempDir) -> Arc<LocalStore> {
    Arc::new(LocalStore::new_with_path(dir.path().join("store.json")))
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

fn op(id: &str, seconds_ago: i64, mutation: Mutation) -> PendingOperation {
    PendingOperation {
        id: id.to_string(),
        timestamp: Utc::now() - Duration::seconds(seconds_ago),
        mutation,
    }
}

#[tokio::test]
async fn test_drain_replays_in_ascending_timestamp_order() {
    let dir = TempDir::new().unwrap();
    let shared = store(&dir);

    // Stored deliberately newest-first; replay must ignore storage order.
    let ops = vec![
        op("u", 1, Mutation::UpdateDish(dish("temp_a", "third"))),
        op("d", 10, Mutation::CreateDish(dish("temp_a", "first"))),
        op("m", 5, Mutation::CreateDish(dish("temp_b", "second"))),
    ];
    shared.set(PENDING_OPERATIONS_KEY, &ops).unwrap();

    let api = ScriptedApi::new();
    let engine = SyncEngine::new(api, shared);
    let summary = engine.sync_all().await;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.successful, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        summary.results.iter().map(|r| r.operation_id.as_str()).collect::<Vec<_>>(),
        vec!["d", "m", "u"]
    );
}

#[tokio::test]
async fn test_failed_operation_stays_queued_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    let shared = store(&dir);

    let ops = vec![
        op("first", 10, Mutation::CreateDish(dish("temp_a", "bad"))),
        op("second", 5, Mutation::CreateDish(dish("temp_b", "good"))),
    ];
    shared.set(PENDING_OPERATIONS_KEY, &ops).unwrap();

    let api = ScriptedApi::failing_for(&["bad"]);
    let engine = SyncEngine::new(api, shared.clone());
    let summary = engine.sync_all().await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.results[0].error.as_deref().unwrap_or("").contains("503"));

    let queue = PendingQueue::new(shared);
    let remaining = queue.list();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "first");
}

#[tokio::test]
async fn test_successful_create_reconciles_temp_record() {
    let dir = TempDir::new().unwrap();
    let shared = store(&dir);

    let temp = dish("temp_123", "Quiche");
    shared.set(DISHES_KEY, &vec![temp.clone()]).unwrap();
    shared
        .set(
            PENDING_OPERATIONS_KEY,
            &vec![op("c", 1, Mutation::CreateDish(temp))],
        )
        .unwrap();

    let engine = SyncEngine::new(ScriptedApi::new(), shared.clone());
    let summary = engine.sync_all().await;

    assert_eq!(summary.successful, 1);
    match &summary.results[0].synced {
        Some(SyncedEntity::Dish(created)) => assert_eq!(created.id, "srv-Quiche"),
        other => panic!("expected synced dish, got {other:?}"),
    }

    let cached: Vec<Dish> = shared.get(DISHES_KEY, Vec::new());
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, "srv-Quiche");
}

#[tokio::test]
async fn test_sync_one_removes_only_on_success() {
    let dir = TempDir::new().unwrap();
    let shared = store(&dir);

    let ops = vec![
        op("ok", 5, Mutation::DeleteDish { id: "d1".to_string() }),
        op("ko", 1, Mutation::DeleteDish { id: "bad".to_string() }),
    ];
    shared.set(PENDING_OPERATIONS_KEY, &ops).unwrap();

    let engine = SyncEngine::new(ScriptedApi::failing_for(&["bad"]), shared);

    let result = engine.sync_one("ok").await.unwrap();
    assert!(result.success);
    assert_eq!(engine.pending_count(), 1);

    let result = engine.sync_one("ko").await.unwrap();
    assert!(!result.success);
    assert_eq!(engine.pending_count(), 1);
}

#[tokio::test]
async fn test_sync_one_unknown_id_returns_none() {
    let dir = TempDir::new().unwrap();
    let engine = SyncEngine::new(ScriptedApi::new(), store(&dir));
    assert!(engine.sync_one("missing").await.is_none());
}

#[tokio::test]
async fn test_empty_queue_yields_empty_summary() {
    let dir = TempDir::new().unwrap();
    let engine = SyncEngine::new(ScriptedApi::new(), store(&dir));
    let summary = engine.sync_all().await;
    assert_eq!(summary.total, 0);
    assert_eq!(summary.describe(), "nothing to sync");
}

#[tokio::test]
async fn test_mixed_entities_drain_strictly_sequentially() {
    let dir = TempDir::new().unwrap();
    let shared = store(&dir);

    let food = Food {
        id: "temp_f".to_string(),
        name: "butter".to_string(),
        aisle: "dairy".to_string(),
        icon: None,
        updated_at: Utc::now(),
    };
    let ops = vec![
        op("b", 5, Mutation::CreateFood(food)),
        op("a", 9, Mutation::CreateDish(dish("temp_d", "Crepes"))),
        op("c", 1, Mutation::DeleteFood { id: "f9".to_string() }),
    ];
    shared.set(PENDING_OPERATIONS_KEY, &ops).unwrap();

    let api = Arc::new(ScriptedApi::new());
    let engine = SyncEngine::new(api.clone(), shared);
    let summary = engine.sync_all().await;
    assert_eq!(summary.successful, 3);
    assert_eq!(engine.pending_count(), 0);

    // Each dispatch is awaited before the next starts, so the recorded
    // call order matches timestamp order across entity types.
    assert_eq!(
        api.calls(),
        vec!["create_dish:Crepes", "create_food:butter", "delete_food:f9"]
    );
}
