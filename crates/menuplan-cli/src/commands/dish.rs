//! Dish CRUD commands.

use clap::Subcommand;
use menuplan_core::{Dish, DishFacade, DishStatus};

use super::common::AppContext;

#[derive(Subcommand)]
pub enum DishAction {
    /// List dishes (remote, falling back to the local cache)
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a dish
    Add {
        /// Dish name
        name: String,
        /// Serving count
        #[arg(long, default_value = "2")]
        servings: u32,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a dish
    Rm {
        /// Dish ID
        id: String,
    },
}

pub async fn run(ctx: &AppContext, action: DishAction) -> Result<(), Box<dyn std::error::Error>> {
    let facade = DishFacade::new(ctx.api.clone(), ctx.store.clone(), ctx.monitor.clone());

    match action {
        DishAction::List { json } => {
            let dishes = facade.get().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&dishes)?);
            } else {
                for dish in &dishes {
                    println!(
                        "{}  {}  ({} servings, {} ingredients)",
                        dish.id,
                        dish.name,
                        dish.servings,
                        dish.ingredients.len()
                    );
                }
                println!("{} dish(es)", dishes.len());
            }
        }
        DishAction::Add { name, servings, tags } => {
            let dish = Dish {
                id: String::new(),
                name,
                ingredients: vec![],
                tags: tags
                    .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
                images: vec![],
                status: DishStatus::Draft,
                servings,
                updated_at: chrono::Utc::now(),
            };
            let created = facade.create(dish).await?;
            println!("Dish created: {} ({})", created.name, created.id);
            if created.id.starts_with("temp_") {
                println!("offline: queued for sync");
            }
        }
        DishAction::Rm { id } => {
            facade.remove(&id).await?;
            println!("Dish removed: {id}");
        }
    }
    Ok(())
}
