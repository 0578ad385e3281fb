//! Core types for the offline mutation queue and its replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Dish, Food};

/// Mutation kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

impl OpKind {
    pub fn label(self) -> &'static str {
        match self {
            OpKind::Create => "create",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        }
    }
}

/// Entity tag for queued mutations.
///
/// Weekly plan and shopping list are client-only in this snapshot
/// (no remote endpoints), so only dishes and foods are ever queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Dish,
    Food,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Dish => "dish",
            EntityKind::Food => "food",
        }
    }
}

/// A mutation intent with its typed payload.
///
/// Replay dispatch matches exhaustively on this; there is no untyped
/// payload field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "payload", rename_all = "snake_case")]
pub enum Mutation {
    CreateDish(Dish),
    UpdateDish(Dish),
    DeleteDish { id: String },
    CreateFood(Food),
    UpdateFood(Food),
    DeleteFood { id: String },
}

impl Mutation {
    pub fn kind(&self) -> OpKind {
        match self {
            Mutation::CreateDish(_) | Mutation::CreateFood(_) => OpKind::Create,
            Mutation::UpdateDish(_) | Mutation::UpdateFood(_) => OpKind::Update,
            Mutation::DeleteDish { .. } | Mutation::DeleteFood { .. } => OpKind::Delete,
        }
    }

    pub fn entity(&self) -> EntityKind {
        match self {
            Mutation::CreateDish(_) | Mutation::UpdateDish(_) | Mutation::DeleteDish { .. } => {
                EntityKind::Dish
            }
            Mutation::CreateFood(_) | Mutation::UpdateFood(_) | Mutation::DeleteFood { .. } => {
                EntityKind::Food
            }
        }
    }

    /// Human-readable label for badges and toasts. The UI owns
    /// rendering; this is just the text.
    pub fn describe(&self) -> String {
        match self {
            Mutation::CreateDish(dish) => format!("create dish '{}'", dish.name),
            Mutation::UpdateDish(dish) => format!("update dish '{}'", dish.name),
            Mutation::DeleteDish { id } => format!("delete dish {id}"),
            Mutation::CreateFood(food) => format!("create food '{}'", food.name),
            Mutation::UpdateFood(food) => format!("update food '{}'", food.name),
            Mutation::DeleteFood { id } => format!("delete food {id}"),
        }
    }
}

/// A durably queued mutation awaiting replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// `{op}_{entity}_{epoch_millis}` at creation time.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub mutation: Mutation,
}

/// Entity returned by a successful replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncedEntity {
    Dish(Dish),
    Food(Food),
    Deleted { id: String },
}

/// Outcome of replaying one pending operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub operation_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced: Option<SyncedEntity>,
}

/// Outcome of a full queue drain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<SyncResult>,
}

impl SyncSummary {
    /// One-line summary for toast display.
    pub fn describe(&self) -> String {
        if self.total == 0 {
            "nothing to sync".to_string()
        } else if self.failed == 0 {
            format!("synced {} operation(s)", self.successful)
        } else {
            format!(
                "synced {} operation(s), {} failed and kept for retry",
                self.successful, self.failed
            )
        }
    }
}
