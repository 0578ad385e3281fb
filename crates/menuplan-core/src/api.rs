//! Remote REST surface consumed by the facades and the sync engine.
//!
//! Each call returns the created/updated entity or an [`ApiError`] on
//! any non-2xx outcome. The facades interpret "fails while offline" as
//! the queue trigger and "fails while online" as a genuine error.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::ApiError;
use crate::model::{Dish, Food};

/// Remote dish endpoints.
#[allow(async_fn_in_trait)]
pub trait DishApi {
    async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError>;
    async fn create_dish(&self, dish: &Dish) -> Result<Dish, ApiError>;
    async fn update_dish(&self, dish: &Dish) -> Result<Dish, ApiError>;
    async fn delete_dish(&self, id: &str) -> Result<(), ApiError>;
}

/// Remote food endpoints.
#[allow(async_fn_in_trait)]
pub trait FoodApi {
    async fn get_foods(&self) -> Result<Vec<Food>, ApiError>;
    async fn create_food(&self, food: &Food) -> Result<Food, ApiError>;
    async fn update_food(&self, food: &Food) -> Result<Food, ApiError>;
    async fn delete_food(&self, id: &str) -> Result<(), ApiError>;
}

// Shared handles forward to the inner client, so one API instance can
// serve several facades and the sync engine.
impl<T: DishApi> DishApi for std::sync::Arc<T> {
    async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
        (**self).get_dishes().await
    }

    async fn create_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        (**self).create_dish(dish).await
    }

    async fn update_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        (**self).update_dish(dish).await
    }

    async fn delete_dish(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete_dish(id).await
    }
}

impl<T: FoodApi> FoodApi for std::sync::Arc<T> {
    async fn get_foods(&self) -> Result<Vec<Food>, ApiError> {
        (**self).get_foods().await
    }

    async fn create_food(&self, food: &Food) -> Result<Food, ApiError> {
        (**self).create_food(food).await
    }

    async fn update_food(&self, food: &Food) -> Result<Food, ApiError> {
        (**self).update_food(food).await
    }

    async fn delete_food(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete_food(id).await
    }
}

/// HTTP client for the menuplan REST backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Quick reachability probe against the health endpoint.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

impl DishApi for HttpApi {
    async fn get_dishes(&self) -> Result<Vec<Dish>, ApiError> {
        self.request::<Vec<Dish>, ()>(Method::GET, "/dishes", None).await
    }

    async fn create_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        self.request(Method::POST, "/dishes", Some(dish)).await
    }

    async fn update_dish(&self, dish: &Dish) -> Result<Dish, ApiError> {
        self.request(Method::PUT, &format!("/dishes/{}", dish.id), Some(dish)).await
    }

    async fn delete_dish(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/dishes/{id}")).await
    }
}

impl FoodApi for HttpApi {
    async fn get_foods(&self) -> Result<Vec<Food>, ApiError> {
        self.request::<Vec<Food>, ()>(Method::GET, "/foods", None).await
    }

    async fn create_food(&self, food: &Food) -> Result<Food, ApiError> {
        self.request(Method::POST, "/foods", Some(food)).await
    }

    async fn update_food(&self, food: &Food) -> Result<Food, ApiError> {
        self.request(Method::PUT, &format!("/foods/{}", food.id), Some(food)).await
    }

    async fn delete_food(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/foods/{id}")).await
    }
}
