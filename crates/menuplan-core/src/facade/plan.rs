//! Weekly plan facade.
//!
//! The weekly dish set and its derived shopping list are client-only
//! state: nothing here talks to the remote API or the pending queue.
//! Every plan change recomputes the shopping list from scratch; manual
//! additions and checkbox toggles edit the stored list in place.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Dish, Ingredient, ShoppingListGroup};
use crate::shopping::{self, MergeDiagnostic};
use crate::store::LocalStore;

pub(crate) const WEEKLY_DISHES_KEY: &str = "weeklyDishes";
pub(crate) const SHOPPING_LIST_KEY: &str = "shoppingList";

pub struct WeeklyPlanFacade {
    store: Arc<LocalStore>,
}

impl WeeklyPlanFacade {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Dishes currently planned for the week.
    pub fn week(&self) -> Vec<Dish> {
        self.store.get(WEEKLY_DISHES_KEY, Vec::new())
    }

    /// Current derived shopping list, including manual rows.
    pub fn shopping_list(&self) -> Vec<ShoppingListGroup> {
        self.store.get(SHOPPING_LIST_KEY, Vec::new())
    }

    /// Adds a dish to the week and regenerates the shopping list.
    /// Adding a dish that is already planned is a no-op.
    pub fn add_dish(&self, dish: Dish) -> Result<Vec<MergeDiagnostic>, StoreError> {
        let mut added = false;
        let week = self
            .store
            .update(WEEKLY_DISHES_KEY, Vec::new(), |week: &mut Vec<Dish>| {
                if !week.iter().any(|d| d.id == dish.id) {
                    week.push(dish.clone());
                    added = true;
                }
            })?;
        if !added {
            return Ok(Vec::new());
        }
        self.regenerate(&week)
    }

    /// Removes a dish from the week and regenerates the shopping list.
    pub fn remove_dish(&self, id: &str) -> Result<Vec<MergeDiagnostic>, StoreError> {
        let week = self
            .store
            .update(WEEKLY_DISHES_KEY, Vec::new(), |week: &mut Vec<Dish>| {
                week.retain(|d| d.id != id)
            })?;
        self.regenerate(&week)
    }

    /// Merges one manual ingredient into the stored shopping list
    /// without touching the weekly dish set.
    pub fn add_item(&self, ingredient: &Ingredient) -> Result<Option<MergeDiagnostic>, StoreError> {
        let mut diagnostic = None;
        self.store.update(
            SHOPPING_LIST_KEY,
            Vec::new(),
            |list: &mut Vec<ShoppingListGroup>| diagnostic = shopping::add_item(list, ingredient),
        )?;
        Ok(diagnostic)
    }

    /// Flips the checked flag of one row. Unknown ids are a no-op.
    pub fn toggle_checked(&self, row_id: &str) -> Result<bool, StoreError> {
        let mut found = false;
        self.store.update(
            SHOPPING_LIST_KEY,
            Vec::new(),
            |list: &mut Vec<ShoppingListGroup>| {
                for group in list.iter_mut() {
                    for row in &mut group.rows {
                        if row.id == row_id {
                            row.checked = !row.checked;
                            found = true;
                        }
                    }
                }
            },
        )?;
        Ok(found)
    }

    fn regenerate(&self, week: &[Dish]) -> Result<Vec<MergeDiagnostic>, StoreError> {
        let (list, diagnostics) = shopping::generate_from_dishes(week);
        self.store.set(SHOPPING_LIST_KEY, &list)?;
        Ok(diagnostics)
    }
}
