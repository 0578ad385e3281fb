//! Shopping list commands.

use clap::Subcommand;
use menuplan_core::units::best_display;
use menuplan_core::{Food, Ingredient, Unit, WeeklyPlanFacade};

use super::common::AppContext;

#[derive(Subcommand)]
pub enum ShopAction {
    /// Show the shopping list grouped by aisle
    Show {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a manual item to the shopping list
    Add {
        /// Item name
        name: String,
        /// Shopping aisle
        #[arg(long, default_value = "other")]
        aisle: String,
        /// Quantity
        #[arg(long, default_value = "1")]
        quantity: f64,
        /// Unit (g, kg, ml, cl, l, unit, tbsp, tsp, cup)
        #[arg(long)]
        unit: Option<String>,
    },
    /// Toggle a row's checked state
    Check {
        /// Row ID
        row_id: String,
    },
}

pub fn run(ctx: &AppContext, action: ShopAction) -> Result<(), Box<dyn std::error::Error>> {
    let plan = WeeklyPlanFacade::new(ctx.store.clone());

    match action {
        ShopAction::Show { json } => {
            let list = plan.shopping_list();
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
                return Ok(());
            }
            for group in &list {
                println!("[{}]", group.aisle);
                for row in &group.rows {
                    let mark = if row.checked { "x" } else { " " };
                    let amount = match row.unit {
                        Some(unit) => {
                            let (qty, unit) = best_display(row.quantity, unit);
                            format!("{qty} {unit}")
                        }
                        None => format!("{}", row.quantity),
                    };
                    println!("  [{mark}] {}  {}  ({})", row.name, amount, row.id);
                }
            }
        }
        ShopAction::Add { name, aisle, quantity, unit } => {
            let unit = match unit {
                Some(raw) => Some(raw.parse::<Unit>()?),
                None => None,
            };
            let ingredient = Ingredient {
                food: Food {
                    id: String::new(),
                    name: name.clone(),
                    aisle,
                    icon: None,
                    updated_at: chrono::Utc::now(),
                },
                quantity,
                unit,
            };
            if let Some(diag) = plan.add_item(&ingredient)? {
                eprintln!("warning: could not merge '{}': {}", diag.ingredient, diag.error);
            }
            println!("Added to shopping list: {name}");
        }
        ShopAction::Check { row_id } => {
            if plan.toggle_checked(&row_id)? {
                println!("Toggled: {row_id}");
            } else {
                return Err(format!("unknown row: {row_id}").into());
            }
        }
    }
    Ok(())
}
