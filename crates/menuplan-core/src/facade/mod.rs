//! Entity read/write facades.
//!
//! The only caller-facing API for domain objects: each mutating call
//! tries the remote API first, and while offline falls back to an
//! optimistic cache write plus a queued pending operation. Reads fall
//! back to the cached collection on any remote failure.

pub mod dishes;
pub mod foods;
pub mod plan;

pub use dishes::DishFacade;
pub use foods::FoodFacade;
pub use plan::WeeklyPlanFacade;

pub(crate) use dishes::DISHES_KEY;
pub(crate) use foods::FOODS_KEY;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tempfile::TempDir;

    use super::{DishFacade, FoodFacade, DISHES_KEY, FOODS_KEY};
    use crate::api::{DishApi, FoodApi};
    use crate::connectivity::ConnectivityMonitor;
    use crate::error::ApiError;
    use crate::model::{Dish, DishStatus, Food};
    use crate::store::LocalStore;
    use crate::sync::queue::PendingQueue;

    /// API double where every endpoint fails, for both entity kinds.
    struct DownApi;

    fn down() -> ApiError {
        ApiError::Status {
            status: 503,
            message: "down".to_string(),
        }
    }

    impl DishApi for DownApi {
        async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
            Err(down())
        }
        async fn create_dish(&self, _dish: &Dish) -> Result<Dish, ApiError> {
            Err(down())
        }
        async fn update_dish(&self, _dish: &Dish) -> Result<Dish, ApiError> {
            Err(down())
        }
        async fn delete_dish(&self, _id: &str) -> Result<(), ApiError> {
            Err(down())
        }
    }

    impl FoodApi for DownApi {
        async fn get_foods(&self) -> Result<Vec<Food>, ApiError> {
            Err(down())
        }
        async fn create_food(&self, _food: &Food) -> Result<Food, ApiError> {
            Err(down())
        }
        async fn update_food(&self, _food: &Food) -> Result<Food, ApiError> {
            Err(down())
        }
        async fn delete_food(&self, _id: &str) -> Result<(), ApiError> {
            Err(down())
        }
    }

    fn dish(name: &str) -> Dish {
        Dish {
            id: String::new(),
            name: name.to_string(),
            ingredients: vec![],
            tags: vec![],
            images: vec![],
            status: DishStatus::Draft,
            servings: 2,
            updated_at: Utc::now(),
        }
    }

    fn food(name: &str) -> Food {
        Food {
            id: String::new(),
            name: name.to_string(),
            aisle: "misc".to_string(),
            icon: None,
            updated_at: Utc::now(),
        }
    }

    // Both facades hammer the shared pending-operations key and their
    // own cache key from separate worker threads; every queued
    // operation and every cached record must survive.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_offline_creates_keep_every_queued_operation() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(LocalStore::new_with_path(dir.path().join("store.json")));
        let monitor = Arc::new(ConnectivityMonitor::new(false));
        let dishes = Arc::new(DishFacade::new(DownApi, store.clone(), monitor.clone()));
        let foods = Arc::new(FoodFacade::new(DownApi, store.clone(), monitor));

        let dish_task = tokio::spawn({
            let dishes = dishes.clone();
            async move {
                for i in 0..40 {
                    dishes.create(dish(&format!("dish {i}"))).await.unwrap();
                }
            }
        });
        let food_task = tokio::spawn({
            let foods = foods.clone();
            async move {
                for i in 0..40 {
                    foods.create(food(&format!("food {i}"))).await.unwrap();
                }
            }
        });
        dish_task.await.unwrap();
        food_task.await.unwrap();

        assert_eq!(PendingQueue::new(store.clone()).pending_count(), 80);
        assert_eq!(store.get::<Vec<Dish>>(DISHES_KEY, Vec::new()).len(), 40);
        assert_eq!(store.get::<Vec<Food>>(FOODS_KEY, Vec::new()).len(), 40);
    }
}
