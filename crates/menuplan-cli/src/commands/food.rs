//! Food catalogue commands.

use clap::Subcommand;
use menuplan_core::{Food, FoodFacade};

use super::common::AppContext;

#[derive(Subcommand)]
pub enum FoodAction {
    /// List foods (remote, falling back to the local cache)
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a food
    Add {
        /// Food name
        name: String,
        /// Shopping aisle (e.g. produce, dairy)
        #[arg(long)]
        aisle: String,
        /// Icon identifier
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a food
    Rm {
        /// Food ID
        id: String,
    },
}

pub async fn run(ctx: &AppContext, action: FoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let facade = FoodFacade::new(ctx.api.clone(), ctx.store.clone(), ctx.monitor.clone());

    match action {
        FoodAction::List { json } => {
            let foods = facade.get().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&foods)?);
            } else {
                for food in &foods {
                    println!("{}  {}  [{}]", food.id, food.name, food.aisle);
                }
                println!("{} food(s)", foods.len());
            }
        }
        FoodAction::Add { name, aisle, icon } => {
            let food = Food {
                id: String::new(),
                name,
                aisle,
                icon,
                updated_at: chrono::Utc::now(),
            };
            let created = facade.create(food).await?;
            println!("Food created: {} ({})", created.name, created.id);
            if created.id.starts_with("temp_") {
                println!("offline: queued for sync");
            }
        }
        FoodAction::Rm { id } => {
            facade.remove(&id).await?;
            println!("Food removed: {id}");
        }
    }
    Ok(())
}
