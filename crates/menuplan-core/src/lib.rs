//! # Menuplan Core Library
//!
//! Offline-first data layer for a recipe and meal-planning client.
//! All state lives in a local JSON-backed store; remote calls go
//! through entity facades that degrade gracefully when the network is
//! gone and queue mutations for later replay.
//!
//! ## Architecture
//!
//! - **Local Store**: durable string-key/JSON-value persistence with
//!   caller-supplied defaults on every read
//! - **Facades**: the only entry point for dish/food/weekly-plan
//!   reads and writes; remote-first with offline write-through
//! - **Pending Queue + Sync Engine**: mutations performed offline are
//!   queued and replayed in timestamp order once connectivity returns
//! - **Shopping Aggregator**: folds dish ingredients into an
//!   aisle-grouped shopping list, merging unit-compatible rows with
//!   fuzzy name matching
//!
//! ## Key Components
//!
//! - [`LocalStore`]: persistence mechanism keyed by caller-owned strings
//! - [`DishFacade`] / [`FoodFacade`] / [`WeeklyPlanFacade`]: entity APIs
//! - [`SyncEngine`]: pending-operation replay
//! - [`ConnectivityMonitor`]: offline/online flag with transition edge
//! - [`HttpApi`]: reqwest client for the REST backend

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod facade;
pub mod model;
pub mod shopping;
pub mod similarity;
pub mod store;
pub mod sync;
pub mod units;

pub use api::{DishApi, FoodApi, HttpApi};
pub use config::Config;
pub use connectivity::ConnectivityMonitor;
pub use error::{ApiError, ConfigError, ConversionError, CoreError, Result, StoreError};
pub use facade::{DishFacade, FoodFacade, WeeklyPlanFacade};
pub use model::{Dish, DishStatus, Food, Ingredient, ShoppingListGroup, ShoppingListRow};
pub use shopping::MergeDiagnostic;
pub use store::LocalStore;
pub use sync::{Mutation, PendingOperation, PendingQueue, SyncEngine, SyncResult, SyncSummary};
pub use units::{Unit, UnitClass};
