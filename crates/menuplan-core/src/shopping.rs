//! Shopping-list aggregation.
//!
//! Folds dish ingredient lists into a list grouped by aisle, merging
//! quantities for similar ingredient names when units allow it.
//!
//! Merge rule per ingredient, in priority order:
//! 1. find an existing row in the aisle group with a similar name;
//! 2. identical units: add quantities directly;
//! 3. different but convertible units: convert into the existing
//!    row's unit, then add; a conversion failure leaves the row
//!    unchanged and is reported as a diagnostic, never an error;
//! 4. incompatible units: push a separate row (the same name can
//!    appear twice under different units -- documented limitation);
//! 5. no similar row: push a new row with a fresh identifier.

use uuid::Uuid;

use crate::error::ConversionError;
use crate::model::{Dish, Ingredient, ShoppingListGroup, ShoppingListRow};
use crate::similarity::are_similar;
use crate::units::{are_convertible, convert};

/// A merge step that fell back to leaving a row unchanged.
///
/// The aggregation itself never fails; conversion problems surface
/// here so callers and tests can assert on them.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeDiagnostic {
    /// Row that kept its previous quantity.
    pub row_id: String,
    /// Name of the ingredient that could not be merged.
    pub ingredient: String,
    pub error: ConversionError,
}

/// Build a grouped shopping list from every ingredient of every dish.
pub fn generate_from_dishes(dishes: &[Dish]) -> (Vec<ShoppingListGroup>, Vec<MergeDiagnostic>) {
    let mut groups = Vec::new();
    let mut diagnostics = Vec::new();

    for dish in dishes {
        for ingredient in &dish.ingredients {
            if let Some(diagnostic) = add_item(&mut groups, ingredient) {
                diagnostics.push(diagnostic);
            }
        }
    }

    (groups, diagnostics)
}

/// Merge a single ingredient into an existing list.
///
/// Also used for manual shopping-list additions outside the
/// dish-derived flow.
pub fn add_item(
    groups: &mut Vec<ShoppingListGroup>,
    ingredient: &Ingredient,
) -> Option<MergeDiagnostic> {
    let aisle = ingredient.food.aisle.as_str();
    let index = match groups.iter().position(|g| g.aisle == aisle) {
        Some(index) => index,
        None => {
            groups.push(ShoppingListGroup {
                aisle: aisle.to_string(),
                rows: Vec::new(),
            });
            groups.len() - 1
        }
    };

    merge_into_group(&mut groups[index], ingredient)
}

fn merge_into_group(
    group: &mut ShoppingListGroup,
    ingredient: &Ingredient,
) -> Option<MergeDiagnostic> {
    let name = ingredient.food.name.as_str();

    if let Some(row) = group.rows.iter_mut().find(|r| are_similar(&r.name, name)) {
        if row.unit == ingredient.unit {
            row.quantity += ingredient.quantity;
            return None;
        }
        if let (Some(from), Some(to)) = (ingredient.unit, row.unit) {
            if are_convertible(from, to) {
                return match convert(ingredient.quantity, from, to) {
                    Ok(converted) => {
                        row.quantity += converted;
                        None
                    }
                    Err(error) => {
                        // Fails soft: the existing quantity stays as is.
                        tracing::warn!(
                            row = %row.name,
                            ingredient = %name,
                            %error,
                            "unit conversion failed during shopping-list merge"
                        );
                        Some(MergeDiagnostic {
                            row_id: row.id.clone(),
                            ingredient: name.to_string(),
                            error,
                        })
                    }
                };
            }
        }
        // Similar name but incompatible units: separate row.
    }

    group.rows.push(new_row(ingredient));
    None
}

fn new_row(ingredient: &Ingredient) -> ShoppingListRow {
    ShoppingListRow {
        id: Uuid::new_v4().to_string(),
        name: ingredient.food.name.clone(),
        icon: ingredient.food.icon.clone(),
        quantity: ingredient.quantity,
        unit: ingredient.unit,
        checked: false,
    }
}
