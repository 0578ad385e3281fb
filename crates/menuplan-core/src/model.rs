//! Domain records cached by the local store.
//!
//! Entities are value-like once fetched; the local store owns the
//! cached copy. A [`Dish`] owns its [`Ingredient`]s by composition --
//! an ingredient has no lifecycle outside its dish.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Dish visibility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishStatus {
    Draft,
    Published,
}

impl Default for DishStatus {
    fn default() -> Self {
        DishStatus::Draft
    }
}

/// A food item, keyed into shopping-list groups by its aisle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    /// Shopping-list category grouping (produce, dairy, ...).
    pub aisle: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Quantity of a food within a dish.
///
/// The quantity is always interpreted relative to the owning dish's
/// current serving count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub food: Food,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<Unit>,
}

/// A dish with its ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: DishStatus,
    pub servings: u32,
    pub updated_at: DateTime<Utc>,
}

impl Dish {
    /// Ingredient quantities rescaled proportionally for a different
    /// serving count. Callers apply [`crate::units::best_display`] at
    /// render time.
    pub fn ingredients_for_servings(&self, servings: u32) -> Vec<Ingredient> {
        if self.servings == 0 || servings == self.servings {
            return self.ingredients.clone();
        }
        let factor = f64::from(servings) / f64::from(self.servings);
        self.ingredients
            .iter()
            .map(|ingredient| Ingredient {
                quantity: ingredient.quantity * factor,
                ..ingredient.clone()
            })
            .collect()
    }
}

/// One merged line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListRow {
    /// Synthetic identifier, fresh per row.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub checked: bool,
}

/// Rows grouped under one aisle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListGroup {
    pub aisle: String,
    pub rows: Vec<ShoppingListRow>,
}
