//! Weekly plan commands.

use clap::Subcommand;
use menuplan_core::{DishFacade, WeeklyPlanFacade};

use super::common::AppContext;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show this week's dishes
    Show,
    /// Add a dish to the week (regenerates the shopping list)
    Add {
        /// Dish ID
        dish_id: String,
    },
    /// Remove a dish from the week (regenerates the shopping list)
    Rm {
        /// Dish ID
        dish_id: String,
    },
}

pub async fn run(ctx: &AppContext, action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let plan = WeeklyPlanFacade::new(ctx.store.clone());

    match action {
        PlanAction::Show => {
            let week = plan.week();
            for dish in &week {
                println!("{}  {}", dish.id, dish.name);
            }
            println!("{} dish(es) planned", week.len());
        }
        PlanAction::Add { dish_id } => {
            let dishes = DishFacade::new(ctx.api.clone(), ctx.store.clone(), ctx.monitor.clone());
            let dish = dishes
                .get()
                .await
                .into_iter()
                .find(|d| d.id == dish_id)
                .ok_or_else(|| format!("unknown dish: {dish_id}"))?;

            let name = dish.name.clone();
            let diagnostics = plan.add_dish(dish)?;
            println!("Added to week: {name}");
            for diag in diagnostics {
                eprintln!("warning: could not merge '{}': {}", diag.ingredient, diag.error);
            }
        }
        PlanAction::Rm { dish_id } => {
            let diagnostics = plan.remove_dish(&dish_id)?;
            println!("Removed from week: {dish_id}");
            for diag in diagnostics {
                eprintln!("warning: could not merge '{}': {}", diag.ingredient, diag.error);
            }
        }
    }
    Ok(())
}
